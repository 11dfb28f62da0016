use std::env;
use std::panic;

use log::error;

use crate::{Error, Result};

const LOG_ENV_NAME: &str = "LAUNCHPAD_LOG";

pub fn print_error(e: Error) {
    match e {
        // Already shown as a status line
        Error::Failed(_) => {}
        _ => error!("{}", e),
    }
}

pub fn fatal(e: Error) -> Result<()> {
    print_error(e);
    std::process::exit(1);
}

pub fn panic_hook() {
    panic::set_hook(Box::new(|info| {
        let message = format!("{}", info);
        print_error(Error::Panic(message));
    }));
}

/// Initialize the logger for a level name.
pub fn log_level(level: &str) -> Result<()> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => {
            env::set_var(LOG_ENV_NAME, level);
            pretty_env_logger::init_custom_env(LOG_ENV_NAME);
            Ok(())
        }
        _ => {
            // Initialize anyway so the error can be logged
            env::set_var(LOG_ENV_NAME, "error");
            pretty_env_logger::init_custom_env(LOG_ENV_NAME);
            Err(Error::UnknownLogLevel(level.to_string()))
        }
    }
}

pub mod launchpad;

pub use self::launchpad::{Command, Launchpad};
