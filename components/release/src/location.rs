use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use config::Layout;

use crate::{update::Updater, Result};

pub(crate) fn delete(layout: &Layout) -> Result<()> {
    for dir in &[&layout.scratch_dir, &layout.install_dir] {
        if utils::fs::remove_dir_all(dir)? {
            info!("Deleted {}", dir.display());
        }
    }
    Ok(())
}

impl Updater {
    /// Remove the scratch and install directories; removing
    /// directories that do not exist succeeds.
    pub fn delete_local_data(&self) -> Result<()> {
        delete(self.layout())
    }

    /// Open the install directory with the platform file browser,
    /// creating it first when missing.
    pub fn open_location(&self) -> Result<PathBuf> {
        let dir = self.layout().install_dir.clone();
        fs::create_dir_all(&dir)?;
        let status = open::that(&dir)?;
        if !status.success() {
            warn!("Open {} exited with {}", dir.display(), status);
        }
        Ok(dir)
    }
}
