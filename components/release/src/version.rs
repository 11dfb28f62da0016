use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::Result;

/// Plain text file holding the installed version.
#[derive(Debug, Clone)]
pub struct VersionStore {
    file: PathBuf,
}

impl VersionStore {
    pub fn new<P: AsRef<Path>>(file: P) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
        }
    }

    /// Read the installed version; a missing, unreadable or blank
    /// file means nothing is installed.
    pub fn read(&self) -> Option<String> {
        match utils::fs::read_string(&self.file) {
            Ok(content) => {
                let version = content.trim();
                if version.is_empty() {
                    None
                } else {
                    Some(version.to_string())
                }
            }
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("Unable to read {} ({})", self.file.display(), e);
                }
                None
            }
        }
    }

    /// Replace the marker contents with `version`.
    pub fn write(&self, version: &str) -> Result<()> {
        debug!("Write version {} to {}", version, self.file.display());
        utils::fs::replace_string(&self.file, version)?;
        Ok(())
    }
}
