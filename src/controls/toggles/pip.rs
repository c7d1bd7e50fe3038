use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    controls::{ClickHandler, ControlButton, ControlError},
    host::{HostPlayer, PictureInPicture, PlatformError},
};

/// `pip_exit` while in picture-in-picture, `pip` otherwise.
pub fn pip_icon(active: bool) -> &'static str {
    if active { "pip_exit" } else { "pip" }
}

/// Enters or leaves picture-in-picture.
///
/// Activity is the platform's page-wide active element: if any element is
/// in picture-in-picture, a click exits it. Like fullscreen, the icon only
/// flips on confirmed success.
#[derive(Clone)]
pub struct PictureInPictureToggle {
    platform: Arc<dyn PictureInPicture>,
}

impl PictureInPictureToggle {
    /// Toggle backed by `platform`.
    pub fn new(platform: Arc<dyn PictureInPicture>) -> Self {
        Self { platform }
    }
}

impl std::fmt::Debug for PictureInPictureToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureInPictureToggle")
            .field("supported", &self.platform.is_supported())
            .finish()
    }
}

#[async_trait]
impl ClickHandler for PictureInPictureToggle {
    async fn on_click(
        &self,
        button: &Arc<ControlButton>,
        player: &Arc<dyn HostPlayer>,
    ) -> Result<(), ControlError> {
        if self.platform.active_element().is_some() {
            self.platform.exit().await?;
            button.update_icon(pip_icon(false));
            return Ok(());
        }

        if !self.platform.is_supported() {
            return Err(PlatformError::Unsupported {
                capability: "picture-in-picture",
            }
            .into());
        }

        self.platform.request(&player.element()).await?;
        button.update_icon(pip_icon(true));
        Ok(())
    }
}
