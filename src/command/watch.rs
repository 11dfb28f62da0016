use std::io::{stderr, Stderr};

use human_bytes::human_bytes;
use log::{debug, info};
use pbr::{ProgressBar, Units};
use release::{Event, Outcome, Progress, Stage};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{Error, Result};

/// Terminal rendering of download progress.
#[derive(Default)]
struct Meter {
    bar: Option<ProgressBar<Stderr>>,
}

impl Meter {
    fn update(&mut self, progress: Progress) {
        // Each transfer starts at zero
        if progress.received == 0 {
            self.finish();
        }

        match progress.total {
            Some(total) => {
                let bar = self.bar.get_or_insert_with(|| {
                    let mut pb = ProgressBar::on(stderr(), total);
                    pb.set_units(Units::Bytes);
                    pb.show_speed = false;
                    pb
                });
                bar.set(progress.received);
            }
            None => debug!("Received {}", human_bytes(progress.received as f64)),
        }
    }

    fn finish(&mut self) {
        if let Some(mut bar) = self.bar.take() {
            bar.finish();
        }
    }
}

/// Consume events from a background command until the channel
/// closes and return the reported outcome.
pub async fn watch(mut rx: UnboundedReceiver<Event>) -> Result<Outcome> {
    let mut meter: Meter = Default::default();
    let mut result = Err(Error::Disconnected);

    while let Some(event) = rx.recv().await {
        match event {
            Event::StatusChanged(message) => {
                meter.finish();
                info!("{}", message);
            }
            Event::ProgressChanged(progress) => meter.update(progress),
            Event::StageChanged(stage) => {
                if stage != Stage::Downloading {
                    meter.finish();
                }
                debug!("Stage {}", stage);
            }
            Event::Completed(outcome) => result = Ok(outcome),
            Event::Failed(failure) => {
                if let Some(ref version) = failure.version {
                    info!("Version {} was not installed", version);
                }
                result = Err(Error::Failed(failure))
            }
        }
    }

    meter.finish();
    result
}
