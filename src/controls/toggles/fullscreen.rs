use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    controls::{ClickHandler, ControlButton, ControlError},
    host::HostPlayer,
};

/// `full_exit` while fullscreen, `full` otherwise.
pub fn fullscreen_icon(is_fullscreen: bool) -> &'static str {
    if is_fullscreen { "full_exit" } else { "full" }
}

/// Enters or leaves fullscreen.
///
/// The icon only flips after the host confirms the transition. A rejected
/// request leaves it untouched until the next `fullscreenchange`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullscreenToggle;

#[async_trait]
impl ClickHandler for FullscreenToggle {
    async fn on_click(
        &self,
        button: &Arc<ControlButton>,
        player: &Arc<dyn HostPlayer>,
    ) -> Result<(), ControlError> {
        if player.is_fullscreen() {
            player.exit_fullscreen().await?;
            button.update_icon(fullscreen_icon(false));
        } else {
            player.request_fullscreen().await?;
            button.update_icon(fullscreen_icon(true));
        }
        Ok(())
    }
}
