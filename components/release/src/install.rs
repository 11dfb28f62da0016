use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use log::{debug, info, warn};
use zip::{result::ZipError, ZipArchive};

use crate::{Error, Result};

fn archive_error(archive: &Path, e: ZipError) -> Error {
    match e {
        ZipError::Io(e) if e.kind() != io::ErrorKind::InvalidData => {
            Error::Io(e)
        }
        _ => Error::BadArchive(archive.to_path_buf(), e),
    }
}

/// Delete the target directory and create it again empty.
fn reset(target: &Path) -> Result<()> {
    if utils::fs::remove_dir_all(target)? {
        debug!("Removed {}", target.display());
    }
    fs::create_dir_all(target)?;
    Ok(())
}

/// Replace the contents of `target` with the contents of a zip archive.
///
/// The archive index is read before anything is deleted; once
/// extraction starts the old tree is gone and a failure leaves the
/// target partially populated.
pub fn install(archive: &Path, target: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file).map_err(|e| archive_error(archive, e))?;

    reset(target)?;

    info!("Extract {} ({} entries)", archive.display(), zip.len());

    for i in 0..zip.len() {
        let mut entry =
            zip.by_index(i).map_err(|e| archive_error(archive, e))?;

        let outpath = match entry.enclosed_name() {
            Some(path) => target.join(path),
            None => {
                warn!("Skip entry outside of archive root {}", entry.name());
                continue;
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            // Any read failure here is damaged entry data.
            let mut buf = Vec::new();
            entry.read_to_end(&mut buf).map_err(|e| {
                Error::BadArchive(archive.to_path_buf(), ZipError::Io(e))
            })?;
            fs::write(&outpath, &buf)?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}

/// Replace the contents of `target` with a single downloaded file
/// stored at `executable`, which must be inside `target`.
pub fn place(file: &Path, target: &Path, executable: &Path) -> Result<()> {
    if !file.is_file() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Download missing {}", file.display()),
        )));
    }

    reset(target)?;
    if let Some(parent) = executable.parent() {
        fs::create_dir_all(parent)?;
    }

    info!("Copy {} -> {}", file.display(), executable.display());
    fs::copy(file, executable)?;
    Ok(())
}
