//! In-process host for running the engine without a real player.
//!
//! Every collaborator trait has a simulated implementation here. The
//! `controlbar-sim` binary and the integration tests drive the engine
//! through them.

mod pip;
mod player;
mod surface;
mod transport;

pub use pip::SimPictureInPicture;
pub use player::SimulatedPlayer;
pub use surface::{DEFAULT_CONTROLS, SimSurface};
pub use transport::{FsTransport, MemoryTransport};

use crate::common::lock;
