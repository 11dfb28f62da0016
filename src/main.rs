extern crate log;
extern crate pretty_env_logger;

use std::sync::Arc;

use log::debug;
use structopt::StructOpt;

use config::Config;
use release::Updater;

use launchpad::{
    command,
    opts::{fatal, Command, Launchpad},
    Result,
};

async fn run(cmd: Option<Command>, updater: Arc<Updater>) -> Result<()> {
    match cmd {
        Some(Command::Check { no_update }) => {
            command::check(updater, !no_update).await?;
        }
        Some(Command::Update {}) => {
            command::update(updater).await?;
        }
        Some(Command::Start {}) => {
            command::start(updater).await?;
        }
        Some(Command::Open {}) => {
            command::open(updater).await?;
        }
        Some(Command::Clean {}) => {
            command::clean(updater).await?;
        }
        Some(Command::Notes {}) => {
            command::notes(updater).await?;
        }
        Some(Command::Status {}) => {
            command::status(&updater)?;
        }
        None => {
            command::launch(updater).await?;
        }
    }
    Ok(())
}

fn load(args: &Launchpad) -> Result<Updater> {
    let config = match args.config {
        Some(ref file) => Config::load(file)?,
        None => Config::load_default()?,
    };

    let platform = args
        .platform
        .clone()
        .unwrap_or_else(release::current_platform);
    debug!("Platform {}", platform);

    Ok(Updater::new(config, platform)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Launchpad::from_args();
    launchpad::opts::panic_hook();
    launchpad::opts::log_level(&*args.log_level).or_else(fatal)?;

    let updater = match load(&args) {
        Ok(updater) => Arc::new(updater),
        Err(e) => return fatal(e),
    };

    run(args.cmd.take(), updater).await.or_else(fatal)?;

    Ok(())
}
