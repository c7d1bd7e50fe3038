//! Structured reports for failures the engine swallows.
//!
//! Nothing inside a control is allowed to fail past its own boundary. What
//! would otherwise be lost is published as a [`Diagnostic`] on a broadcast
//! channel the host may subscribe to, and mirrored to `tracing` when the
//! `log` option is enabled.

use tokio::sync::broadcast;
use tracing::warn;

const DIAGNOSTIC_CAPACITY: usize = 256;

/// A failure that was recovered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An icon could not be fetched; the control fell back to text.
    AssetLoadFailed {
        /// Asset path that was requested
        path: String,
        /// Transport error or response status
        reason: String,
    },

    /// A platform call (fullscreen, picture-in-picture, seek) was rejected
    /// or is unsupported; the control's icon was left unchanged.
    PlatformRejected {
        /// Control whose click triggered the call
        control: String,
        /// Platform error description
        reason: String,
    },

    /// A click handler panicked.
    ClickFailed {
        /// Control whose handler failed
        control: String,
        /// Failure description
        reason: String,
    },
}

/// Diagnostic sink shared by every component of one engine.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    log: bool,
    tx: broadcast::Sender<Diagnostic>,
}

impl Diagnostics {
    /// Create a sink. `log` controls whether reports are also logged.
    pub fn new(log: bool) -> Self {
        let (tx, _) = broadcast::channel(DIAGNOSTIC_CAPACITY);
        Self { log, tx }
    }

    /// Whether reports are mirrored to the log.
    pub fn log_enabled(&self) -> bool {
        self.log
    }

    /// Subscribe to every diagnostic reported after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Diagnostic> {
        self.tx.subscribe()
    }

    /// Publish a diagnostic. Never fails, even without subscribers.
    pub fn report(&self, diagnostic: Diagnostic) {
        if self.log {
            match &diagnostic {
                Diagnostic::AssetLoadFailed { path, reason } => {
                    warn!(%path, %reason, "Failed to load icon asset");
                }
                Diagnostic::PlatformRejected { control, reason } => {
                    warn!(%control, %reason, "Platform rejected control action");
                }
                Diagnostic::ClickFailed { control, reason } => {
                    warn!(%control, %reason, "Click handler failed");
                }
            }
        }

        let _ = self.tx.send(diagnostic);
    }
}
