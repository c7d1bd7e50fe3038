use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    controls::{ClickHandler, ControlButton, ControlError},
    host::HostPlayer,
};

const LOW_VOLUME_MAX: f64 = 0.33;
const MID_VOLUME_MAX: f64 = 0.66;

/// Pick the volume icon.
///
/// | condition                 | icon         |
/// |---------------------------|--------------|
/// | muted or volume is 0      | `audio_mute` |
/// | volume <= 0.33            | `audio_low`  |
/// | volume <= 0.66            | `audio_mid`  |
/// | otherwise                 | `audio_full` |
pub fn volume_icon(muted: bool, volume: f64) -> &'static str {
    if muted || volume == 0.0 {
        "audio_mute"
    } else if volume <= LOW_VOLUME_MAX {
        "audio_low"
    } else if volume <= MID_VOLUME_MAX {
        "audio_mid"
    } else {
        "audio_full"
    }
}

/// Flips the mute flag.
///
/// The icon is computed from the volume read before the flip and the new
/// flag, without waiting for `volumechange`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MuteToggle;

#[async_trait]
impl ClickHandler for MuteToggle {
    async fn on_click(
        &self,
        button: &Arc<ControlButton>,
        player: &Arc<dyn HostPlayer>,
    ) -> Result<(), ControlError> {
        let volume = player.volume();
        let muted = !player.muted();
        player.set_muted(muted);
        button.update_icon(volume_icon(muted, volume));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries() {
        assert_eq!(volume_icon(false, 0.0), "audio_mute");
        assert_eq!(volume_icon(false, 0.01), "audio_low");
        assert_eq!(volume_icon(false, 0.33), "audio_low");
        assert_eq!(volume_icon(false, 0.34), "audio_mid");
        assert_eq!(volume_icon(false, 0.66), "audio_mid");
        assert_eq!(volume_icon(false, 0.67), "audio_full");
        assert_eq!(volume_icon(false, 1.0), "audio_full");
    }

    #[test]
    fn muted_wins_at_any_volume() {
        for volume in [0.0, 0.2, 0.5, 1.0] {
            assert_eq!(volume_icon(true, volume), "audio_mute");
        }
    }
}
