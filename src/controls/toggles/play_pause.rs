use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    controls::{ClickHandler, ControlButton, ControlError},
    host::HostPlayer,
};

/// `pause` while playing, `play` otherwise.
pub fn play_pause_icon(paused: bool) -> &'static str {
    if paused { "play" } else { "pause" }
}

/// Toggles playback and re-renders its own icon right away.
///
/// The `play`/`pause` notification re-renders the same icon a second time;
/// identity dedup makes that free.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayPauseToggle;

#[async_trait]
impl ClickHandler for PlayPauseToggle {
    async fn on_click(
        &self,
        button: &Arc<ControlButton>,
        player: &Arc<dyn HostPlayer>,
    ) -> Result<(), ControlError> {
        if player.paused() {
            player.play().await?;
        } else {
            player.pause();
        }
        button.update_icon(play_pause_icon(player.paused()));
        Ok(())
    }
}
