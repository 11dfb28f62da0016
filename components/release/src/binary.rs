use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::{Error, Result};

#[cfg(windows)]
fn permissions(_executable: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn permissions(executable: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = executable.metadata()?;
    let mut permissions = metadata.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(executable, permissions)?;
    Ok(())
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

/// Start an installed executable without waiting for it.
///
/// The working directory is the directory containing the executable.
pub fn launch(executable: &Path) -> Result<()> {
    if !executable.is_file() {
        return Err(Error::ExecutableNotFound(executable.to_path_buf()));
    }

    permissions(executable)?;

    let mut command = Command::new(executable);
    if let Some(dir) = executable.parent() {
        debug!("Working directory {}", dir.display());
        command.current_dir(dir);
    }
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    detach(&mut command);

    let child = command.spawn()?;
    info!("Started {} (pid {})", executable.display(), child.id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn missing_executable() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let err = launch(&dir.path().join("Build/Launcher.exe"))
            .err()
            .expect("expected failure");
        assert_eq!(ErrorKind::ExecutableNotFound, err.kind());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn launch_sets_mode_and_cwd() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        use std::time::{Duration, Instant};

        let dir = tempfile::tempdir()?;
        let exe = dir.path().join("bin/app");
        utils::fs::write_string(&exe, "#!/bin/sh\necho started > started.txt\n")?;
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o644))?;

        launch(&exe)?;

        let mode = exe.metadata()?.permissions().mode();
        assert_eq!(0o755, mode & 0o777);

        let marker = dir.path().join("bin/started.txt");
        let deadline = Instant::now() + Duration::from_secs(10);
        while !marker.exists() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
        }
        assert!(marker.exists());
        Ok(())
    }
}
