use std::future::Future;
use std::path::Path;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Response};
use tokio::{fs::File, io::AsyncWriteExt};
use url::Url;

use crate::{Error, Result};

/// Bytes received so far for a single transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub received: u64,
    /// Content length reported by the server, if any.
    pub total: Option<u64>,
}

impl Progress {
    pub fn new(received: u64, total: Option<u64>) -> Self {
        Self { received, total }
    }

    /// Whole percentage complete; `None` when the total is unknown.
    pub fn percent(&self) -> Option<u8> {
        self.total.map(|total| {
            if total == 0 {
                100
            } else {
                std::cmp::min(100, self.received * 100 / total) as u8
            }
        })
    }
}

/// Single attempt HTTP transfers with a fixed timeout.
#[derive(Debug, Clone)]
pub struct Transfer {
    client: Client,
    timeout: Duration,
}

impl Transfer {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().connect_timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    async fn within<F, T>(&self, url: &Url, fut: F) -> Result<T>
    where
        F: Future<Output = reqwest::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(Error::Timeout(url.clone())),
        }
    }

    async fn get(&self, url: &Url) -> Result<Response> {
        debug!("GET {}", url);
        let response = self.within(url, self.client.get(url.clone()).send()).await?;
        if !response.status().is_success() {
            return Err(Error::HttpStatus(response.status(), url.clone()));
        }
        Ok(response)
    }

    /// Stream a response body into a file.
    ///
    /// The callback receives a progress value before the first chunk
    /// and after every chunk written. A failed transfer leaves the
    /// partial file in place.
    pub async fn fetch<P, F>(
        &self,
        url: &Url,
        path: P,
        mut on_progress: F,
    ) -> Result<u64>
    where
        P: AsRef<Path>,
        F: FnMut(Progress),
    {
        let mut response = self.get(url).await?;
        let total = response.content_length();

        debug!("File {}", path.as_ref().display());

        let mut content_file = File::create(path.as_ref()).await?;
        let mut received: u64 = 0;
        on_progress(Progress::new(received, total));

        while let Some(chunk) = self.within(url, response.chunk()).await? {
            content_file.write_all(&chunk).await?;
            received += chunk.len() as u64;
            on_progress(Progress::new(received, total));
        }
        content_file.flush().await?;

        Ok(received)
    }

    /// Fetch a response body as trimmed text.
    pub async fn fetch_text(&self, url: &Url) -> Result<String> {
        let response = self.get(url).await?;
        let text = self.within(url, response.text()).await?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixture, ErrorKind};

    #[test]
    fn percent() {
        assert_eq!(None, Progress::new(10, None).percent());
        assert_eq!(Some(0), Progress::new(0, Some(300)).percent());
        assert_eq!(Some(33), Progress::new(100, Some(300)).percent());
        assert_eq!(Some(99), Progress::new(299, Some(300)).percent());
        assert_eq!(Some(100), Progress::new(300, Some(300)).percent());
        assert_eq!(Some(100), Progress::new(0, Some(0)).percent());
    }

    #[tokio::test]
    async fn fetch_reports_monotonic_progress() -> Result<()> {
        let body = vec![7u8; 256 * 1024];
        let server = fixture::serve("1.0.0", Some(body.clone())).await;
        let dir = tempfile::tempdir()?;
        let dest = dir.path().join("Build.zip");

        let transfer = Transfer::new(Duration::from_secs(10))?;
        let mut seen = Vec::new();
        let received = transfer
            .fetch(&server.url("Build.zip"), &dest, |p| seen.push(p))
            .await?;

        assert_eq!(body.len() as u64, received);
        assert_eq!(body, std::fs::read(&dest)?);

        let percents: Vec<u8> =
            seen.iter().map(|p| p.percent().unwrap()).collect();
        assert_eq!(Some(&0), percents.first());
        assert_eq!(Some(&100), percents.last());
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_not_found() -> Result<()> {
        let server = fixture::serve("1.0.0", None).await;
        let dir = tempfile::tempdir()?;
        let transfer = Transfer::new(Duration::from_secs(10))?;
        let result = transfer
            .fetch(&server.url("Build.zip"), dir.path().join("Build.zip"), |_| {})
            .await;
        let err = result.err().expect("expected a status error");
        assert_eq!(ErrorKind::HttpStatus(404), err.kind());
        Ok(())
    }

    #[tokio::test]
    async fn fetch_text_trims() -> Result<()> {
        let server = fixture::serve("  2.3.0\n", None).await;
        let transfer = Transfer::new(Duration::from_secs(10))?;
        let text = transfer.fetch_text(&server.url("Version.txt")).await?;
        assert_eq!("2.3.0", text);
        Ok(())
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() -> Result<()> {
        let url = fixture::unreachable("Version.txt");
        let transfer = Transfer::new(Duration::from_secs(10))?;
        let err = transfer.fetch_text(&url).await.err().expect("expected failure");
        assert_eq!(ErrorKind::Network, err.kind());
        Ok(())
    }

    #[tokio::test]
    async fn silent_server_times_out() -> Result<()> {
        let url = fixture::stalled("Version.txt").await;
        let transfer = Transfer::new(Duration::from_secs(1))?;
        let err = transfer.fetch_text(&url).await.err().expect("expected failure");
        assert!(matches!(err, Error::Timeout(_)));
        assert_eq!(ErrorKind::Network, err.kind());
        Ok(())
    }
}
