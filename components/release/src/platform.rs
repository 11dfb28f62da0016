use std::path::PathBuf;

use config::{
    target::{LINUX, MACOS, WINDOWS},
    Config, Layout, TargetKind,
};
use url::Url;

use crate::Result;

/// Identifier of the host platform used to select a target.
pub fn current_platform() -> String {
    match std::env::consts::OS {
        "windows" => WINDOWS.to_string(),
        "macos" => MACOS.to_string(),
        "linux" => LINUX.to_string(),
        other => other.to_string(),
    }
}

/// What to download for a platform and where its executable lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub url: Url,
    /// File name in the scratch directory.
    pub name: String,
    /// Absolute path of the executable inside the build directory.
    pub executable: PathBuf,
    pub kind: TargetKind,
}

/// Resolve the artifact for a platform.
pub(crate) fn select(
    config: &Config,
    layout: &Layout,
    platform: &str,
) -> Result<Artifact> {
    let target = config.target(platform)?;
    Ok(Artifact {
        url: config::parse_url(&target.archive_url)?,
        name: target.archive_name.clone(),
        executable: layout.build_dir.join(&target.executable),
        kind: target.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_default_targets() -> Result<()> {
        let mut config: Config = Default::default();
        config.file = Some(PathBuf::from("/opt/launchpad/launchpad.toml"));
        let layout = config.layout()?;

        let windows = select(&config, &layout, WINDOWS)?;
        assert_eq!("Build.zip", windows.name);
        assert_eq!(
            PathBuf::from("/opt/launchpad/game/Build/Build/Launcher.exe"),
            windows.executable
        );

        let linux = select(&config, &layout, LINUX)?;
        assert_eq!("BuildLinux.zip", linux.name);
        assert_eq!(TargetKind::Archive, linux.kind);

        assert!(select(&config, &layout, "plan9").is_err());
        Ok(())
    }
}
