use log::{debug, warn};

use crate::update::Updater;

/// Shown when the release notes cannot be fetched.
pub static PLACEHOLDER: &str = "No release notes available.";

impl Updater {
    /// Fetch the release notes; never fails, any error yields the
    /// placeholder text.
    pub async fn release_notes(&self) -> String {
        let url = match self.config().notes_url() {
            Ok(url) => url,
            Err(e) => {
                warn!("Release notes unavailable ({})", e);
                return PLACEHOLDER.to_string();
            }
        };

        match self.transfer().fetch_text(&url).await {
            Ok(notes) if !notes.is_empty() => notes,
            Ok(_) => {
                debug!("Release notes are empty");
                PLACEHOLDER.to_string()
            }
            Err(e) => {
                warn!("Release notes unavailable ({})", e);
                PLACEHOLDER.to_string()
            }
        }
    }
}
