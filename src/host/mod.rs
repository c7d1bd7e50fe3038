//! Narrow interfaces to the collaborators the engine drives.
//!
//! The host player, the surface controls are mounted on, and the platform
//! capabilities (asset transport, picture-in-picture) are all consumed
//! through these traits and assumed correct.

/// Platform and transport error types
pub mod error;
/// Platform capabilities: asset transport and picture-in-picture
pub mod platform;
/// Host player state, actions and notifications
pub mod player;
/// Control surface the engine mounts its controls on
pub mod surface;

pub use error::{PlatformError, TransportError};
pub use platform::{AssetResponse, AssetTransport, FetchMode, PictureInPicture};
pub use player::{ElementId, HostPlayer, PlayerEvent, PlayerState};
pub use surface::{ControlOptions, ControlSurface};
