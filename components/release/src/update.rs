use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Layout, TargetKind};
use log::{debug, info};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    download::{Progress, Transfer},
    event::{Event, Failure, Outcome, Stage},
    install, platform, version::VersionStore, Result,
};

/// Sending half of the event channel.
pub type Events = UnboundedSender<Event>;

static VERSION_DOWNLOAD: &str = "version.txt";

/// State for one orchestrated run, dropped once the outcome is sent.
pub(crate) struct Session {
    events: Events,
    stage: Stage,
    remote: Option<String>,
    progress: Option<Progress>,
}

impl Session {
    pub(crate) fn new(events: &Events) -> Self {
        Self {
            events: events.clone(),
            stage: Stage::Idle,
            remote: None,
            progress: None,
        }
    }

    // Nobody listening is fine, the work still runs to completion.
    fn send(&self, event: Event) {
        let _ = self.events.send(event);
    }

    fn enter(&mut self, stage: Stage) {
        debug!("Stage {} -> {}", self.stage, stage);
        self.stage = stage;
        self.send(Event::StageChanged(stage));
    }

    pub(crate) fn status<S: Into<String>>(&self, message: S) {
        self.send(Event::StatusChanged(message.into()));
    }

    // Chunks that do not move the whole percentage are not reported.
    fn progress(&mut self, progress: Progress) {
        let repeat = match self.progress {
            Some(last) => {
                progress.received != 0
                    && last.total == progress.total
                    && last.percent().is_some()
                    && last.percent() == progress.percent()
            }
            None => false,
        };
        self.progress = Some(progress);
        if !repeat {
            self.send(Event::ProgressChanged(progress));
        }
    }

    /// Report the outcome of a command that has no stages.
    pub(crate) fn complete(&self, result: &Result<Outcome>) {
        match result {
            Ok(outcome) => self.send(Event::Completed(outcome.clone())),
            Err(e) => {
                let mut failure = Failure::from(e);
                failure.version = self.remote.clone();
                self.status(failure.status());
                self.send(Event::Failed(failure));
            }
        }
    }

    /// Report the outcome of a staged run and return to idle.
    fn finish(mut self, result: Result<Outcome>) -> Result<Outcome> {
        if result.is_err() {
            self.enter(Stage::Failed);
        }
        self.complete(&result);
        self.enter(Stage::Idle);
        result
    }
}

/// Checks, downloads, installs and launches a build.
#[derive(Debug)]
pub struct Updater {
    config: Config,
    layout: Layout,
    platform: String,
    transfer: Transfer,
    store: VersionStore,
}

impl Updater {
    pub fn new(config: Config, platform: String) -> Result<Self> {
        config.validate()?;
        let layout = config.layout()?;
        let transfer = Transfer::new(Duration::from_secs(config.timeout))?;
        let store = VersionStore::new(&layout.marker_file);
        Ok(Self {
            config,
            layout,
            platform,
            transfer,
            store,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub(crate) fn transfer(&self) -> &Transfer {
        &self.transfer
    }

    /// Version recorded by the last successful update.
    pub fn local_version(&self) -> Option<String> {
        self.store.read()
    }

    /// Path of the executable for this platform.
    pub fn executable(&self) -> Result<PathBuf> {
        let target = self.config.target(&self.platform)?;
        Ok(self.layout.build_dir.join(&target.executable))
    }

    /// Installed means a version marker AND the executable exist.
    pub fn is_installed(&self) -> bool {
        self.local_version().is_some()
            && self.executable().map(|p| p.is_file()).unwrap_or(false)
    }

    /// Compare the remote version with the installed build and
    /// install the remote version when they differ or the build is
    /// missing; with `install` false only report availability.
    pub async fn check(&self, events: &Events, install: bool) -> Result<Outcome> {
        let mut session = Session::new(events);
        let result = self.check_session(&mut session, install).await;
        session.finish(result)
    }

    /// Download and install the remote version unconditionally.
    pub async fn update(&self, events: &Events) -> Result<Outcome> {
        let mut session = Session::new(events);
        let result = self.update_session(&mut session).await;
        session.finish(result)
    }

    async fn check_session(
        &self,
        session: &mut Session,
        install: bool,
    ) -> Result<Outcome> {
        session.enter(Stage::Checking);
        session.status("Checking remote version...");

        let url = self.config.version_url()?;
        let remote = self.transfer.fetch_text(&url).await?;
        session.remote = Some(remote.clone());

        let local = self.store.read();
        let executable = self.executable()?;
        let present = executable.is_file();
        debug!(
            "Remote {}, local {:?}, executable {} ({})",
            remote,
            local,
            executable.display(),
            present
        );

        if local.as_deref() == Some(remote.as_str()) && present {
            session.enter(Stage::UpToDate);
            session.status(format!("Version {} is up to date", remote));
            return Ok(Outcome::UpToDate(remote));
        }

        session.enter(Stage::UpdateNeeded);
        session.status(format!("New version available: {}", remote));

        if !install {
            return Ok(Outcome::UpdateAvailable(remote));
        }

        self.update_session(session).await
    }

    async fn update_session(&self, session: &mut Session) -> Result<Outcome> {
        session.enter(Stage::Downloading);
        let artifact =
            platform::select(&self.config, &self.layout, &self.platform)?;

        let scratch = &self.layout.scratch_dir;
        tokio::fs::create_dir_all(scratch).await?;

        session.status("Downloading version...");
        let version_url = self.config.version_url()?;
        let version_file = scratch.join(VERSION_DOWNLOAD);
        self.transfer
            .fetch(&version_url, &version_file, |p| session.progress(p))
            .await?;

        session.status(format!("Downloading {}...", artifact.name));
        let archive_file = scratch.join(&artifact.name);
        self.transfer
            .fetch(&artifact.url, &archive_file, |p| session.progress(p))
            .await?;

        let version = tokio::fs::read_to_string(&version_file)
            .await?
            .trim()
            .to_string();
        session.remote = Some(version.clone());

        session.enter(Stage::Extracting);
        session.status("Extracting files...");
        let build_dir = self.layout.build_dir.clone();
        let executable = artifact.executable.clone();
        let kind = artifact.kind;
        tokio::task::spawn_blocking(move || match kind {
            TargetKind::Archive => install::install(&archive_file, &build_dir),
            TargetKind::Executable => {
                install::place(&archive_file, &build_dir, &executable)
            }
        })
        .await??;

        session.enter(Stage::Finalizing);
        session.status("Writing version...");
        self.store.write(&version)?;

        session.enter(Stage::Done);
        session.status(format!("Installed version {}", version));
        info!("Installed {} to {}", version, self.layout.build_dir.display());

        Ok(Outcome::Installed(version))
    }
}
