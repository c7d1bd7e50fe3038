use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    controls::{ClickHandler, ControlButton, ControlError},
    host::HostPlayer,
    sync::{OVERLAY_PLAY_ICON, OverlayReset},
};

/// Pauses, rewinds to the start and resets the overlay.
///
/// Has no icon state of its own. If the media cannot be rewound it is still
/// paused, but the overlay is left as it was.
#[derive(Debug, Clone)]
pub struct StopButton {
    overlay: Arc<ControlButton>,
    reset: OverlayReset,
}

impl StopButton {
    /// Stop behaviour resetting `overlay`.
    ///
    /// `reset` must be shared with the synchronization layer so the reset
    /// lands after the pause notification this click causes.
    pub fn new(overlay: Arc<ControlButton>, reset: OverlayReset) -> Self {
        Self { overlay, reset }
    }
}

#[async_trait]
impl ClickHandler for StopButton {
    async fn on_click(
        &self,
        _button: &Arc<ControlButton>,
        player: &Arc<dyn HostPlayer>,
    ) -> Result<(), ControlError> {
        if let Err(err) = player.set_current_time(0.0) {
            player.pause();
            return Err(err.into());
        }

        if !player.paused() {
            self.reset.arm();
        }
        player.pause();
        self.overlay.update_icon(OVERLAY_PLAY_ICON);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::{
        assets::{AssetCache, AssetLoader},
        controls::ButtonSpec,
        diagnostics::Diagnostics,
        host::{AssetTransport, PlatformError},
        sim::{MemoryTransport, SimulatedPlayer},
    };

    fn overlay() -> Arc<ControlButton> {
        let transport = Arc::new(MemoryTransport::new());
        let diagnostics = Diagnostics::new(false);
        let loader = AssetLoader::new(
            transport as Arc<dyn AssetTransport>,
            AssetCache::new(),
            diagnostics.clone(),
        );
        ControlButton::new(ButtonSpec::new("overlay", ""), "/icons/", loader, diagnostics)
    }

    #[tokio::test]
    async fn arms_reset_when_stopping_playback() {
        let overlay = overlay();
        let reset = OverlayReset::new();
        let stop = StopButton::new(Arc::clone(&overlay), reset.clone());
        let sim = Arc::new(SimulatedPlayer::new("video-1"));
        let player: Arc<dyn HostPlayer> = sim.clone();
        player.play().await.unwrap();
        sim.set_current_time(30.0).unwrap();

        stop.on_click(&overlay, &player).await.unwrap();

        assert!(player.paused());
        assert_eq!(player.current_time(), 0.0);
        assert!(reset.is_armed());
    }

    #[tokio::test]
    async fn already_paused_player_needs_no_deferred_reset() {
        let overlay = overlay();
        let reset = OverlayReset::new();
        let stop = StopButton::new(Arc::clone(&overlay), reset.clone());
        let player: Arc<dyn HostPlayer> = Arc::new(SimulatedPlayer::new("video-1"));

        stop.on_click(&overlay, &player).await.unwrap();

        assert!(!reset.is_armed());
        assert_eq!(overlay.current_icon().as_deref(), Some(OVERLAY_PLAY_ICON));
    }

    #[tokio::test]
    async fn unseekable_media_is_paused_without_reset() {
        let overlay = overlay();
        let reset = OverlayReset::new();
        let stop = StopButton::new(Arc::clone(&overlay), reset.clone());
        let sim = Arc::new(SimulatedPlayer::new("video-1"));
        sim.set_seekable(false);
        let player: Arc<dyn HostPlayer> = sim.clone();
        player.play().await.unwrap();

        let result = stop.on_click(&overlay, &player).await;

        assert!(matches!(
            result,
            Err(ControlError::Platform(PlatformError::NotSeekable))
        ));
        assert!(player.paused());
        assert!(!reset.is_armed());
        assert_eq!(overlay.current_icon(), None);
    }
}
