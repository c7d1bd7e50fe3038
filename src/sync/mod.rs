//! Keeps control icons in step with player notifications.
//!
//! Notifications carry no payload. For each one the layer re-queries the
//! player, maps state to an icon with the same pure functions the toggles
//! use, and asks the affected buttons to update. Notifications are handled
//! strictly in delivery order; the icon loads they start run concurrently.

mod overlay;

#[cfg(test)]
mod tests;

pub use overlay::{
    OVERLAY_PAUSE_ICON, OVERLAY_PLAY_ICON, OverlayClick, OverlayReset, overlay_icon,
};

use std::sync::Arc;

use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};
use tracing::{debug, trace, warn};

use crate::{
    controls::{
        ControlButton,
        toggles::{SettingsSlot, fullscreen_icon, pip_icon, play_pause_icon, volume_icon},
    },
    host::{HostPlayer, PictureInPicture, PlayerEvent, PlayerState},
};

/// Buttons whose icons follow player state.
#[derive(Debug, Clone)]
pub struct SyncTargets {
    /// Play/pause toggle
    pub play_pause: Arc<ControlButton>,
    /// Mute/volume toggle
    pub volume: Arc<ControlButton>,
    /// Fullscreen toggle
    pub fullscreen: Arc<ControlButton>,
    /// Picture-in-picture toggle
    pub picture_in_picture: Arc<ControlButton>,
    /// Big overlay over the video surface
    pub overlay: Arc<ControlButton>,
}

/// Maps player notifications onto icon updates.
pub struct SyncLayer {
    player: Arc<dyn HostPlayer>,
    pip: Arc<dyn PictureInPicture>,
    targets: SyncTargets,
    settings: Arc<SettingsSlot>,
    overlay_reset: OverlayReset,
}

impl SyncLayer {
    /// Create a layer driving `targets` from `player`.
    pub fn new(
        player: Arc<dyn HostPlayer>,
        pip: Arc<dyn PictureInPicture>,
        targets: SyncTargets,
        settings: Arc<SettingsSlot>,
        overlay_reset: OverlayReset,
    ) -> Self {
        Self {
            player,
            pip,
            targets,
            settings,
            overlay_reset,
        }
    }

    /// Handle one notification.
    ///
    /// Returns the icon loads it started so callers can wait for them.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime when an icon load starts.
    pub fn apply(&self, event: PlayerEvent) -> Vec<JoinHandle<()>> {
        trace!(event = event.name(), "Player notification");
        let mut updates = Vec::new();

        match event {
            PlayerEvent::Play | PlayerEvent::Pause | PlayerEvent::Ended => {
                let icon = play_pause_icon(self.player.paused());
                updates.extend(self.targets.play_pause.update_icon(icon));
                let reset = event == PlayerEvent::Pause && self.overlay_reset.take();
                let overlay = if reset {
                    Some(OVERLAY_PLAY_ICON)
                } else {
                    overlay_icon(event)
                };
                if let Some(icon) = overlay {
                    updates.extend(self.targets.overlay.update_icon(icon));
                }
            }
            PlayerEvent::VolumeChange => {
                let icon = volume_icon(self.player.muted(), self.player.volume());
                updates.extend(self.targets.volume.update_icon(icon));
            }
            PlayerEvent::FullscreenChange => {
                let icon = fullscreen_icon(self.player.is_fullscreen());
                updates.extend(self.targets.fullscreen.update_icon(icon));
            }
            PlayerEvent::RateChange => self.show_rate(),
            PlayerEvent::EnterPictureInPicture | PlayerEvent::LeavePictureInPicture => {
                let state = PlayerState::capture(self.player.as_ref(), self.pip.as_ref());
                let icon = pip_icon(state.picture_in_picture_active);
                updates.extend(self.targets.picture_in_picture.update_icon(icon));
            }
        }

        updates
    }

    /// Re-render every state-driven control from a fresh snapshot.
    ///
    /// The overlay is left alone; it reflects the last transition rather
    /// than a state.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime when an icon load starts.
    pub fn refresh(&self) -> Vec<JoinHandle<()>> {
        let state = PlayerState::capture(self.player.as_ref(), self.pip.as_ref());
        self.show_rate();

        [
            (&self.targets.play_pause, play_pause_icon(state.paused)),
            (&self.targets.volume, volume_icon(state.muted, state.volume)),
            (&self.targets.fullscreen, fullscreen_icon(state.is_fullscreen)),
            (
                &self.targets.picture_in_picture,
                pip_icon(state.picture_in_picture_active),
            ),
        ]
        .into_iter()
        .filter_map(|(button, icon)| button.update_icon(icon))
        .collect()
    }

    fn show_rate(&self) {
        if let Some(panel) = self.settings.get() {
            panel.show_rate(self.player.playback_rate());
        }
    }

    /// Process `events` until the player stops emitting.
    ///
    /// Missed notifications (a lagging subscription) trigger a full
    /// [`SyncLayer::refresh`].
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(self, mut events: broadcast::Receiver<PlayerEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        self.apply(event);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Missed player notifications, refreshing controls");
                        self.refresh();
                    }
                    Err(RecvError::Closed) => {
                        debug!("Player notifications closed");
                        break;
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for SyncLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncLayer")
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}
