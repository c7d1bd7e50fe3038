use std::sync::Arc;

use tracing::{debug, instrument};

use super::AssetCache;
use crate::{
    diagnostics::{Diagnostic, Diagnostics},
    host::{AssetTransport, FetchMode},
};

/// Loads icon markup through a transport, cache first.
///
/// Successful loads are cached for the life of the cache. Failures are
/// never cached: the next request for the same path goes back to the
/// transport.
#[derive(Clone)]
pub struct AssetLoader {
    transport: Arc<dyn AssetTransport>,
    cache: AssetCache,
    diagnostics: Diagnostics,
}

impl AssetLoader {
    /// Create a loader over `transport`, storing successes in `cache`.
    pub fn new(
        transport: Arc<dyn AssetTransport>,
        cache: AssetCache,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            transport,
            cache,
            diagnostics,
        }
    }

    /// The cache this loader reads and fills.
    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    /// Load the markup at `path`.
    ///
    /// Returns `None` on transport failure or a non-success status, after
    /// reporting an [`Diagnostic::AssetLoadFailed`]. Never fails otherwise.
    #[instrument(skip(self))]
    pub async fn load(&self, path: &str) -> Option<Arc<str>> {
        if let Some(markup) = self.cache.get(path).await {
            debug!("Asset cache hit");
            return Some(markup);
        }

        let reason = match self.transport.fetch(path, FetchMode::PreferCache).await {
            Ok(response) if response.is_success() => {
                let markup = self.cache.insert(path, Arc::from(response.body)).await;
                return Some(markup);
            }
            Ok(response) => format!("unexpected status {}", response.status),
            Err(e) => e.to_string(),
        };

        self.diagnostics.report(Diagnostic::AssetLoadFailed {
            path: path.to_string(),
            reason,
        });
        None
    }
}

impl std::fmt::Debug for AssetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetLoader")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::{assets::icon_path, sim::MemoryTransport};

    fn loader(transport: &Arc<MemoryTransport>) -> (AssetLoader, Diagnostics) {
        let diagnostics = Diagnostics::new(false);
        let loader = AssetLoader::new(
            Arc::clone(transport) as Arc<dyn AssetTransport>,
            AssetCache::new(),
            diagnostics.clone(),
        );
        (loader, diagnostics)
    }

    #[test]
    fn icon_path_concatenates() {
        assert_eq!(icon_path("/icons/", "play"), "/icons/play.svg");
    }

    #[tokio::test]
    async fn success_is_cached() {
        let transport = Arc::new(MemoryTransport::new());
        transport.insert("/icons/play.svg", "<svg>play</svg>");
        let (loader, _) = loader(&transport);

        let first = loader.load("/icons/play.svg").await.unwrap();
        let second = loader.load("/icons/play.svg").await.unwrap();

        assert_eq!(&*first, "<svg>play</svg>");
        assert_eq!(first, second);
        assert_eq!(transport.request_count("/icons/play.svg"), 1);
        assert_eq!(loader.cache().len().await, 1);
    }

    #[tokio::test]
    async fn failure_is_retried() {
        let transport = Arc::new(MemoryTransport::new());
        let (loader, diagnostics) = loader(&transport);
        let mut reports = diagnostics.subscribe();

        assert!(loader.load("/icons/gone.svg").await.is_none());
        assert!(matches!(
            reports.try_recv().unwrap(),
            Diagnostic::AssetLoadFailed { ref reason, .. } if reason.contains("404")
        ));

        transport.insert("/icons/gone.svg", "<svg/>");
        assert!(loader.load("/icons/gone.svg").await.is_some());
        assert_eq!(transport.request_count("/icons/gone.svg"), 2);
    }

    #[tokio::test]
    async fn network_error_yields_none() {
        let transport = Arc::new(MemoryTransport::new());
        transport.fail_network("/icons/pip.svg");
        let (loader, diagnostics) = loader(&transport);
        let mut reports = diagnostics.subscribe();

        assert!(loader.load("/icons/pip.svg").await.is_none());
        assert!(matches!(
            reports.try_recv().unwrap(),
            Diagnostic::AssetLoadFailed { ref reason, .. } if reason.starts_with("network error")
        ));
        assert!(loader.cache().is_empty().await);
    }

    #[tokio::test]
    async fn requests_prefer_cache() {
        let transport = Arc::new(MemoryTransport::new());
        transport.insert("/icons/gear.svg", "<svg/>");
        let (loader, _) = loader(&transport);

        loader.load("/icons/gear.svg").await;
        assert_eq!(transport.modes(), vec![FetchMode::PreferCache]);
    }
}
