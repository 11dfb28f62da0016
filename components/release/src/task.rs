use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::task::JoinHandle;

use crate::{
    binary,
    event::{Event, Outcome},
    location,
    update::{Events, Session, Updater},
    Result,
};

/// Commands a caller may trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Check { install: bool },
    Update,
    Start,
    OpenLocation,
    DeleteLocalData,
}

impl Updater {
    /// Run a command on a background task.
    ///
    /// Events arrive on the returned receiver in order; the channel
    /// closes after the final `Completed` or `Failed` event.
    pub fn spawn(self: Arc<Self>, command: Command) -> UnboundedReceiver<Event> {
        let (tx, rx) = unbounded_channel();
        tokio::spawn(async move {
            let _ = self.run(&tx, command).await;
        });
        rx
    }

    /// Fetch the release notes on a background task.
    pub fn spawn_release_notes(self: Arc<Self>) -> JoinHandle<String> {
        tokio::spawn(async move { self.release_notes().await })
    }

    /// Run a command, reporting progress and the outcome as events.
    pub async fn run(&self, events: &Events, command: Command) -> Result<Outcome> {
        debug!("Run {:?}", command);
        let session = Session::new(events);
        let result = match command {
            Command::Check { install } => return self.check(events, install).await,
            Command::Update => return self.update(events).await,
            Command::Start => self.start(&session).await,
            Command::OpenLocation => self.open_location().map(Outcome::Opened),
            Command::DeleteLocalData => self.delete(&session).await,
        };
        session.complete(&result);
        result
    }

    async fn start(&self, session: &Session) -> Result<Outcome> {
        let executable = self.executable()?;
        session.status(format!("Starting {}...", executable.display()));
        let path = executable.clone();
        tokio::task::spawn_blocking(move || binary::launch(&path)).await??;
        Ok(Outcome::Started(executable))
    }

    async fn delete(&self, session: &Session) -> Result<Outcome> {
        session.status("Deleting local data...");
        let layout = self.layout().clone();
        tokio::task::spawn_blocking(move || location::delete(&layout)).await??;
        session.status("Local data deleted");
        Ok(Outcome::Deleted)
    }
}
