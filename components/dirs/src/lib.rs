use std::path::PathBuf;
use std::{fs, io};

static ROOT_DIR: &str = ".launchpad";

static CONFIG_FILE: &str = "launchpad.toml";

static INSTALL_NAME: &str = "game";
static SCRATCH_NAME: &str = "downloads";

/// The launcher root directory, created when missing.
pub fn root_dir() -> io::Result<PathBuf> {
    let home = home::home_dir();
    if let Some(ref home) = home {
        let mut buf = home.clone();
        buf.push(ROOT_DIR);
        if !buf.exists() {
            fs::create_dir(&buf)?;
        }
        return Ok(buf);
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "Could not determine home directory".to_string(),
    ))
}

pub fn config_file() -> io::Result<PathBuf> {
    Ok(root_dir()?.join(CONFIG_FILE))
}

pub fn install_name() -> &'static str {
    INSTALL_NAME
}

pub fn scratch_name() -> &'static str {
    SCRATCH_NAME
}
