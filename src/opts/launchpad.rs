use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
/// Keep a game build up to date and launch it
#[structopt(
    name = "launchpad",
    after_help = "EXAMPLES:
    Update if needed then start the game:
        launchpad
    Only report whether an update exists:
        launchpad check --no-update
    Remove all downloaded and installed files:
        launchpad clean"
)]
pub struct Launchpad {
    /// Log level
    #[structopt(long, default_value = "info")]
    pub log_level: String,

    /// Configuration file
    #[structopt(short, long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Platform target (linux, macos or windows)
    #[structopt(long)]
    pub platform: Option<String>,

    #[structopt(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Check the remote version and update when stale
    Check {
        /// Report an available update without installing it
        #[structopt(long)]
        no_update: bool,
    },

    /// Download and install the latest build
    Update {},

    /// Start the installed build
    Start {},

    /// Open the install location
    Open {},

    /// Delete downloaded and installed files
    #[structopt(alias = "rm")]
    Clean {},

    /// Print the release notes
    Notes {},

    /// Print the installed version
    Status {},
}
