use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No target configured for platform {0}")]
    NoTarget(String),

    #[error("Invalid URL {0} ({1})")]
    InvalidUrl(String, url::ParseError),

    #[error("Configuration file {0} is not a file")]
    NotFile(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlDeser(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
pub mod target;

pub use config::*;
pub use target::{Target, TargetKind};
