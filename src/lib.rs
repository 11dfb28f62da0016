use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown log level: {0}")]
    UnknownLogLevel(String),

    #[error("{0}")]
    Panic(String),

    #[error("Background task stopped without reporting an outcome")]
    Disconnected,

    #[error("{}", .0.message)]
    Failed(release::Failure),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Config(#[from] config::Error),

    #[error(transparent)]
    Release(#[from] release::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod command;
pub mod opts;
