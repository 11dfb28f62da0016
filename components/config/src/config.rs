use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use url::Url;

use crate::{
    target::{self, Target},
    Error, Result,
};

static RELEASE_URL: &str =
    "https://github.com/acierto-incomodo/unrailed/releases/latest/download";

static VERSION_TXT: &str = "Version.txt";
static NOTES_TXT: &str = "ReleaseNotes.txt";
static MARKER_FILE: &str = "version.txt";
static BUILD_DIR: &str = "Build";

/// Seconds allowed for connecting, for text requests and for
/// each body read while streaming.
pub static TIMEOUT: u64 = 30;

/// Parse and validate an endpoint URL.
pub fn parse_url<S: AsRef<str>>(url: S) -> Result<Url> {
    Url::parse(url.as_ref())
        .map_err(|e| Error::InvalidUrl(url.as_ref().to_string(), e))
}

pub(crate) fn release_url(name: &str) -> String {
    format!("{}/{}", RELEASE_URL, name)
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Directory holding the version marker and the build.
    pub install_dir: Option<PathBuf>,
    /// Directory for in-progress downloads.
    pub scratch_dir: Option<PathBuf>,
    /// Marker file relative to the install directory.
    pub marker_file: PathBuf,
    /// Build directory relative to the install directory.
    pub build_dir: PathBuf,

    pub version_url: String,
    pub notes_url: String,

    pub timeout: u64,

    pub targets: BTreeMap<String, Target>,

    #[serde(skip)]
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            install_dir: None,
            scratch_dir: None,
            marker_file: PathBuf::from(MARKER_FILE),
            build_dir: PathBuf::from(BUILD_DIR),
            version_url: release_url(VERSION_TXT),
            notes_url: release_url(NOTES_TXT),
            timeout: TIMEOUT,
            targets: target::defaults(),
            file: None,
        }
    }
}

/// Absolute locations derived from a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub install_dir: PathBuf,
    pub scratch_dir: PathBuf,
    pub marker_file: PathBuf,
    pub build_dir: PathBuf,
}

impl Config {
    /// Load a configuration file; a missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(p: P) -> Result<Self> {
        let file = p.as_ref();
        debug!("Load {}", file.display());

        let mut cfg: Config = if file.exists() {
            if !file.is_file() {
                return Err(Error::NotFile(file.to_path_buf()));
            }
            let content = utils::fs::read_string(file)?;
            toml::from_str(&content)?
        } else {
            Default::default()
        };

        cfg.file = Some(file.to_path_buf());
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load the configuration file from the launcher root directory.
    pub fn load_default() -> Result<Self> {
        Config::load(dirs::config_file()?)
    }

    /// Ensure every endpoint parses.
    pub fn validate(&self) -> Result<()> {
        parse_url(&self.version_url)?;
        parse_url(&self.notes_url)?;
        for target in self.targets.values() {
            parse_url(&target.archive_url)?;
        }
        Ok(())
    }

    pub fn version_url(&self) -> Result<Url> {
        parse_url(&self.version_url)
    }

    pub fn notes_url(&self) -> Result<Url> {
        parse_url(&self.notes_url)
    }

    /// Look up the artifact settings for a platform.
    pub fn target(&self, platform: &str) -> Result<&Target> {
        self.targets
            .get(platform)
            .ok_or_else(|| Error::NoTarget(platform.to_string()))
    }

    /// Directory that relative paths resolve against: the directory
    /// of the configuration file, otherwise the launcher root.
    fn base(&self) -> Result<PathBuf> {
        if let Some(parent) = self.file.as_ref().and_then(|f| f.parent()) {
            if parent != Path::new("") {
                return Ok(parent.to_path_buf());
            }
            return Ok(std::env::current_dir()?);
        }
        Ok(dirs::root_dir()?)
    }

    /// Resolve the directories used by the launcher.
    pub fn layout(&self) -> Result<Layout> {
        let base = self.base()?;
        let resolve = |value: &Option<PathBuf>, name: &str| match value {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => base.join(name),
        };

        let install_dir = resolve(&self.install_dir, dirs::install_name());
        let scratch_dir = resolve(&self.scratch_dir, dirs::scratch_name());
        let marker_file = install_dir.join(&self.marker_file);
        let build_dir = install_dir.join(&self.build_dir);

        Ok(Layout {
            install_dir,
            scratch_dir,
            marker_file,
            build_dir,
        })
    }
}
