use std::fmt;
use std::path::PathBuf;

use crate::{download::Progress, Error, ErrorKind};

/// Stages of an orchestrated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Checking,
    UpToDate,
    UpdateNeeded,
    Downloading,
    Extracting,
    Finalizing,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Checking => "checking",
            Stage::UpToDate => "up to date",
            Stage::UpdateNeeded => "update needed",
            Stage::Downloading => "downloading",
            Stage::Extracting => "extracting",
            Stage::Finalizing => "finalizing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Successful result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Installed version matches the remote version.
    UpToDate(String),
    /// A newer version exists and installing was not requested.
    UpdateAvailable(String),
    /// The version was downloaded and installed.
    Installed(String),
    Started(PathBuf),
    Opened(PathBuf),
    Deleted,
}

/// Error details sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
    /// Remote version the failed run was installing, when known.
    pub version: Option<String>,
}

impl Failure {
    /// Status line shown to the user.
    pub fn status(&self) -> String {
        format!("Error: {}", self.message)
    }
}

impl From<&Error> for Failure {
    fn from(e: &Error) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
            version: None,
        }
    }
}

/// Notification from background work, consumed in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StatusChanged(String),
    ProgressChanged(Progress),
    StageChanged(Stage),
    Completed(Outcome),
    Failed(Failure),
}
