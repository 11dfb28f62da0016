use std::sync::Arc;

use log::info;
use release::{Command, Outcome, Updater};

use crate::Result;

mod watch;

pub use watch::watch;

/// Check the remote version, installing it unless `install` is false.
pub async fn check(updater: Arc<Updater>, install: bool) -> Result<Outcome> {
    watch(updater.spawn(Command::Check { install })).await
}

pub async fn update(updater: Arc<Updater>) -> Result<Outcome> {
    watch(updater.spawn(Command::Update)).await
}

pub async fn start(updater: Arc<Updater>) -> Result<Outcome> {
    watch(updater.spawn(Command::Start)).await
}

pub async fn open(updater: Arc<Updater>) -> Result<Outcome> {
    watch(updater.spawn(Command::OpenLocation)).await
}

pub async fn clean(updater: Arc<Updater>) -> Result<Outcome> {
    watch(updater.spawn(Command::DeleteLocalData)).await
}

fn print_notes(notes: &str) {
    info!("Release notes:");
    for line in notes.lines() {
        info!("  {}", line);
    }
}

pub async fn notes(updater: Arc<Updater>) -> Result<()> {
    let notes = updater.spawn_release_notes().await?;
    print_notes(&notes);
    Ok(())
}

pub fn status(updater: &Updater) -> Result<()> {
    info!("Platform {}", updater.platform());
    info!("Marker {}", updater.layout().marker_file.display());
    info!("Executable {}", updater.executable()?.display());
    match updater.local_version() {
        Some(version) if updater.is_installed() => {
            info!("Installed version {}", version)
        }
        Some(version) => {
            info!("Version {} is recorded but the build is missing", version)
        }
        None => info!("Not installed"),
    }
    Ok(())
}

/// Update when needed then start the build, showing the release
/// notes once the check has finished.
pub async fn launch(updater: Arc<Updater>) -> Result<Outcome> {
    let notes = Arc::clone(&updater).spawn_release_notes();
    let outcome = check(Arc::clone(&updater), true).await?;
    print_notes(&notes.await?);

    match outcome {
        Outcome::UpToDate(_) | Outcome::Installed(_) => start(updater).await,
        other => Ok(other),
    }
}
