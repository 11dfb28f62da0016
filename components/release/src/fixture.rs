//! Local release server and archive builders for tests.

use std::io::{Cursor, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use config::{Config, Target, TargetKind};
use url::Url;
use warp::{http::StatusCode, Filter};

pub(crate) static PLATFORM: &str = "linux";
pub(crate) static EXECUTABLE: &str = "bin/app";

pub(crate) struct Server {
    addr: SocketAddr,
    archive_hits: Arc<AtomicUsize>,
}

impl Server {
    pub fn url(&self, name: &str) -> Url {
        Url::parse(&format!("http://{}/{}", self.addr, name)).unwrap()
    }

    pub fn archive_hits(&self) -> usize {
        self.archive_hits.load(Ordering::SeqCst)
    }

    /// Configuration rooted in `dir` that talks to this server.
    pub fn config(&self, dir: &Path) -> Config {
        let mut config: Config = Default::default();
        config.file = Some(dir.join("launchpad.toml"));
        config.version_url = self.url("Version.txt").to_string();
        config.notes_url = self.url("ReleaseNotes.txt").to_string();
        config.timeout = 10;
        config.targets.clear();
        config.targets.insert(
            PLATFORM.to_string(),
            Target {
                archive_url: self.url("Build.zip").to_string(),
                archive_name: "Build.zip".to_string(),
                executable: EXECUTABLE.into(),
                kind: TargetKind::Archive,
            },
        );
        config
    }
}

/// Serve a version string, release notes and an optional archive;
/// a missing archive responds with 404.
pub(crate) async fn serve(version: &str, archive: Option<Vec<u8>>) -> Server {
    let archive_hits = Arc::new(AtomicUsize::new(0));

    let version = version.to_string();
    let version_route = warp::path("Version.txt")
        .and(warp::path::end())
        .map(move || version.clone());

    let notes_route = warp::path("ReleaseNotes.txt")
        .and(warp::path::end())
        .map(|| "Faster trains\n");

    let hits = archive_hits.clone();
    let archive_route = warp::path("Build.zip")
        .and(warp::path::end())
        .map(move || {
            hits.fetch_add(1, Ordering::SeqCst);
            match archive.clone() {
                Some(bytes) => warp::reply::with_status(bytes, StatusCode::OK),
                None => {
                    warp::reply::with_status(Vec::new(), StatusCode::NOT_FOUND)
                }
            }
        });

    let routes = version_route.or(notes_route).or(archive_route);
    let (addr, server) =
        warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    Server { addr, archive_hits }
}

/// A URL on a local port with nothing listening.
pub(crate) fn unreachable(name: &str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/{}", addr, name)).unwrap()
}

/// A URL on a local port that accepts connections and never replies.
pub(crate) async fn stalled(name: &str) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    Url::parse(&format!("http://{}/{}", addr, name)).unwrap()
}

/// Hex text that deflate cannot shrink much.
pub(crate) fn noise(len: usize) -> String {
    let mut state: u32 = 0x2545_f491;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            std::char::from_digit(state % 16, 16).unwrap()
        })
        .collect()
}

/// Zip archive with an intact index and damaged data in the first
/// entry, which must compress to well over a hundred bytes.
pub(crate) fn corrupt_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut bytes = zip_archive(entries);
    for b in &mut bytes[60..100] {
        *b ^= 0xff;
    }
    bytes
}

/// Build a zip archive in memory.
pub(crate) fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
