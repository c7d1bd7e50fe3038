//! controlbar - icon-driven player controls kept in sync with playback state.
//!
//! The engine mounts a row of custom controls on a host player and keeps
//! every control's icon consistent with the player's live state:
//!
//! - Icon assets load asynchronously through a cache-first loader and fall
//!   back to a text label when they cannot be fetched
//! - Toggle coordinators (play/pause, stop, mute, fullscreen,
//!   picture-in-picture, settings) only flip their icons when the host
//!   confirms the transition
//! - A synchronization layer maps player notifications to icon updates
//!
//! Failures never escape a control; they are published as
//! [`diagnostics::Diagnostic`] events.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use controlbar::{
//!     bootstrap::{Engine, EngineOptions, HostBindings},
//!     sim::{MemoryTransport, SimPictureInPicture, SimSurface, SimulatedPlayer},
//! };
//!
//! # async fn run() -> controlbar::Result<()> {
//! let host = HostBindings {
//!     player: Arc::new(SimulatedPlayer::new("video-1")),
//!     surface: Arc::new(SimSurface::new()),
//!     pip: Arc::new(SimPictureInPicture::new(true)),
//!     transport: Arc::new(MemoryTransport::new()),
//! };
//! let engine = Engine::install(host, EngineOptions::default())?;
//! engine.click("playToggle").await;
//! # Ok(())
//! # }
//! ```

/// Icon asset resolution, loading and caching.
pub mod assets;

/// Engine installation and the control registry.
pub mod bootstrap;

/// Shared building blocks.
pub mod common;

/// Engine configuration.
pub mod config;

/// Control buttons and toggle coordinators.
pub mod controls;

/// Core error types and result aliases.
pub mod core;

/// Structured reports of swallowed failures.
pub mod diagnostics;

/// Interfaces to the host player and platform.
pub mod host;

/// In-process simulation of the host.
pub mod sim;

/// Notification-driven icon synchronization.
pub mod sync;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{ControlBarError, Result};
