use std::path::PathBuf;

use http::StatusCode;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Download failed; status: {0}, url: {1}")]
    HttpStatus(StatusCode, Url),

    #[error("Request timed out; url: {0}")]
    Timeout(Url),

    #[error("Invalid archive {0} ({1})")]
    BadArchive(PathBuf, zip::result::ZipError),

    #[error("Executable not found {0}")]
    ExecutableNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Config(#[from] config::Error),
}

/// Machine readable category for an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    HttpStatus(u16),
    Filesystem,
    ArchiveFormat,
    ExecutableNotFound,
    Configuration,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::HttpStatus(status, _) => ErrorKind::HttpStatus(status.as_u16()),
            Error::Timeout(_) | Error::Request(_) => ErrorKind::Network,
            Error::BadArchive(_, _) => ErrorKind::ArchiveFormat,
            Error::ExecutableNotFound(_) => ErrorKind::ExecutableNotFound,
            Error::Io(_) | Error::Join(_) => ErrorKind::Filesystem,
            Error::Config(_) => ErrorKind::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

mod binary;
mod download;
mod event;
mod install;
mod location;
mod notes;
mod platform;
mod task;
mod update;
mod version;

#[cfg(test)]
mod fixture;

pub use binary::launch;
pub use download::{Progress, Transfer};
pub use event::{Event, Failure, Outcome, Stage};
pub use install::{install, place};
pub use notes::PLACEHOLDER as NOTES_PLACEHOLDER;
pub use platform::{current_platform, Artifact};
pub use task::Command;
pub use update::{Events, Updater};
pub use version::VersionStore;
