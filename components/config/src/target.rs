use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::release_url;

pub static LINUX: &str = "linux";
pub static MACOS: &str = "macos";
pub static WINDOWS: &str = "windows";

/// How a downloaded artifact becomes the installed build.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Zip archive unpacked into the build directory.
    Archive,
    /// Single file placed at the executable path.
    Executable,
}

impl Default for TargetKind {
    fn default() -> Self {
        TargetKind::Archive
    }
}

/// Artifact settings for one platform.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Target {
    pub archive_url: String,
    /// File name used in the scratch directory.
    pub archive_name: String,
    /// Executable relative to the build directory.
    pub executable: PathBuf,
    #[serde(default)]
    pub kind: TargetKind,
}

impl Target {
    fn archive(archive: &str, name: &str, executable: &str) -> Self {
        Self {
            archive_url: release_url(archive),
            archive_name: name.to_string(),
            executable: PathBuf::from(executable),
            kind: TargetKind::Archive,
        }
    }
}

pub(crate) fn defaults() -> BTreeMap<String, Target> {
    let mut targets = BTreeMap::new();
    targets.insert(
        WINDOWS.to_string(),
        Target::archive("Build.zip", "Build.zip", "Build/Launcher.exe"),
    );
    targets.insert(
        LINUX.to_string(),
        Target::archive("Build.zip", "BuildLinux.zip", "Build/Launcher.exe"),
    );
    targets.insert(
        MACOS.to_string(),
        Target::archive("Build.zip", "BuildMac.zip", "Build/Launcher.exe"),
    );
    targets
}
