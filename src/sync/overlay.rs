use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;

use crate::{
    controls::{ClickHandler, ControlButton, ControlError},
    host::{HostPlayer, PlayerEvent},
};

/// Overlay icon after playback starts, ends, or is stopped.
pub const OVERLAY_PLAY_ICON: &str = "bigplay";
/// Overlay icon after playback pauses.
pub const OVERLAY_PAUSE_ICON: &str = "bigpause";

/// Overlay icon for a notification, if the overlay reacts to it.
pub fn overlay_icon(event: PlayerEvent) -> Option<&'static str> {
    match event {
        PlayerEvent::Play | PlayerEvent::Ended => Some(OVERLAY_PLAY_ICON),
        PlayerEvent::Pause => Some(OVERLAY_PAUSE_ICON),
        _ => None,
    }
}

/// Overlay reset waiting on a pause notification that is still queued.
///
/// Stop arms it right before pausing a playing player; the synchronization
/// layer consumes it when that `Pause` arrives and shows [`OVERLAY_PLAY_ICON`]
/// instead of [`OVERLAY_PAUSE_ICON`].
#[derive(Debug, Default, Clone)]
pub struct OverlayReset(Arc<AtomicBool>);

impl OverlayReset {
    /// A disarmed reset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a reset for the next pause notification.
    pub fn arm(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a reset is waiting.
    pub fn is_armed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Clicking the overlay toggles playback; its icon follows notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct OverlayClick;

#[async_trait]
impl ClickHandler for OverlayClick {
    async fn on_click(
        &self,
        _button: &Arc<ControlButton>,
        player: &Arc<dyn HostPlayer>,
    ) -> Result<(), ControlError> {
        if player.paused() {
            player.play().await?;
        } else {
            player.pause();
        }
        Ok(())
    }
}
