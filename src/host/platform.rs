use async_trait::async_trait;

use super::{ElementId, PlatformError, TransportError};

/// Retrieval policy passed to the asset transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Use any stored copy, stale or not, before going to the network
    PreferCache,
}

/// A transport response. Only 2xx statuses carry usable markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    /// HTTP-like status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl AssetResponse {
    /// A 200 response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches assets by path.
#[async_trait]
pub trait AssetTransport: Send + Sync + 'static {
    /// Retrieve `path`.
    ///
    /// # Errors
    /// Returns `TransportError` when no response was obtained at all.
    async fn fetch(&self, path: &str, mode: FetchMode) -> Result<AssetResponse, TransportError>;
}

/// Page-wide picture-in-picture capability.
///
/// At most one element across the page can be in picture-in-picture at a
/// time, so activity is read here rather than tracked per control.
#[async_trait]
pub trait PictureInPicture: Send + Sync + 'static {
    /// Whether the environment supports picture-in-picture at all.
    fn is_supported(&self) -> bool;

    /// The element currently shown in picture-in-picture, if any.
    fn active_element(&self) -> Option<ElementId>;

    /// Show `element` in picture-in-picture.
    ///
    /// # Errors
    /// Returns an error if the platform rejects the request.
    async fn request(&self, element: &ElementId) -> Result<(), PlatformError>;

    /// Leave picture-in-picture.
    ///
    /// # Errors
    /// Returns an error if the platform rejects the request.
    async fn exit(&self) -> Result<(), PlatformError>;
}
