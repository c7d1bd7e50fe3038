use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::debug;

use super::lock;
use crate::host::{AssetResponse, AssetTransport, FetchMode, TransportError};

#[derive(Debug, Clone)]
enum Stored {
    Body(String),
    Status(u16),
    Network,
}

/// Transport serving assets from memory.
///
/// Records every request, can fail specific paths, and can hold a path's
/// responses until released so completions can be reordered.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    assets: Mutex<HashMap<String, Stored>>,
    requests: Mutex<Vec<(String, FetchMode)>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl MemoryTransport {
    /// Create a transport with no assets; unknown paths answer 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path`.
    pub fn insert(&self, path: &str, body: &str) {
        lock(&self.assets).insert(path.to_string(), Stored::Body(body.to_string()));
    }

    /// Answer `path` with a non-success `status`.
    pub fn fail_status(&self, path: &str, status: u16) {
        lock(&self.assets).insert(path.to_string(), Stored::Status(status));
    }

    /// Fail `path` without producing any response.
    pub fn fail_network(&self, path: &str) {
        lock(&self.assets).insert(path.to_string(), Stored::Network);
    }

    /// Make requests for `path` wait until [`MemoryTransport::release`].
    pub fn hold(&self, path: &str) {
        lock(&self.gates).insert(path.to_string(), Arc::new(Semaphore::new(0)));
    }

    /// Let one held request for `path` complete.
    pub fn release(&self, path: &str) {
        if let Some(gate) = lock(&self.gates).get(path) {
            gate.add_permits(1);
        }
    }

    /// Every requested path, in request order.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests)
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Fetch modes of every request, in request order.
    pub fn modes(&self) -> Vec<FetchMode> {
        lock(&self.requests).iter().map(|(_, mode)| *mode).collect()
    }

    /// How many times `path` was requested.
    pub fn request_count(&self, path: &str) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|(requested, _)| requested == path)
            .count()
    }
}

#[async_trait]
impl AssetTransport for MemoryTransport {
    async fn fetch(&self, path: &str, mode: FetchMode) -> Result<AssetResponse, TransportError> {
        lock(&self.requests).push((path.to_string(), mode));

        let gate = lock(&self.gates).get(path).cloned();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let stored = lock(&self.assets).get(path).cloned();
        match stored {
            Some(Stored::Body(body)) => Ok(AssetResponse::ok(body)),
            Some(Stored::Status(status)) => Ok(AssetResponse {
                status,
                body: String::new(),
            }),
            Some(Stored::Network) => Err(TransportError::Network(format!(
                "connection reset while fetching {path}"
            ))),
            None => Ok(AssetResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

/// Transport serving assets from a directory.
///
/// Asset paths are resolved relative to `root`; a leading `/` is ignored.
/// The filesystem has no HTTP cache, so the fetch mode has no effect.
#[derive(Debug, Clone)]
pub struct FsTransport {
    root: PathBuf,
}

impl FsTransport {
    /// Serve assets below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, TransportError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(TransportError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetTransport for FsTransport {
    async fn fetch(&self, path: &str, _mode: FetchMode) -> Result<AssetResponse, TransportError> {
        let file = self.resolve(path)?;
        debug!(file = %file.display(), "Reading asset");

        match tokio::fs::read_to_string(&file).await {
            Ok(body) => Ok(AssetResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AssetResponse {
                status: 404,
                body: String::new(),
            }),
            Err(e) => Err(TransportError::Network(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::fs;

    use super::*;

    #[tokio::test]
    async fn fs_transport_serves_files() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/play.svg"), "<svg>play</svg>").unwrap();
        let transport = FsTransport::new(dir.path());

        let found = transport
            .fetch("/icons/play.svg", FetchMode::PreferCache)
            .await
            .unwrap();
        assert!(found.is_success());
        assert_eq!(found.body, "<svg>play</svg>");

        let missing = transport
            .fetch("/icons/stop.svg", FetchMode::PreferCache)
            .await
            .unwrap();
        assert_eq!(missing.status, 404);
    }

    #[tokio::test]
    async fn fs_transport_rejects_parent_components() {
        let dir = tempfile::TempDir::new().unwrap();
        let transport = FsTransport::new(dir.path());

        let error = transport
            .fetch("/icons/../../etc/passwd", FetchMode::PreferCache)
            .await
            .unwrap_err();
        assert!(matches!(error, TransportError::InvalidPath(_)));
    }

    #[tokio::test]
    async fn held_request_waits_for_release() {
        let transport = Arc::new(MemoryTransport::new());
        transport.insert("/a.svg", "a");
        transport.hold("/a.svg");

        let pending = tokio::spawn({
            let transport = Arc::clone(&transport);
            async move { transport.fetch("/a.svg", FetchMode::PreferCache).await }
        });
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        transport.release("/a.svg");
        let response = pending.await.unwrap().unwrap();
        assert_eq!(response.body, "a");
    }
}
