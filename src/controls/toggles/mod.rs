//! Click behaviour and icon selection for each control.
//!
//! Each coordinator pairs a pure state→icon function with a
//! [`ClickHandler`](super::ClickHandler). The synchronization layer uses the
//! same icon functions, so a click and the notification it causes always
//! agree on the terminal icon.

mod fullscreen;
mod pip;
mod play_pause;
mod settings;
mod stop;
mod volume;

pub use fullscreen::{FullscreenToggle, fullscreen_icon};
pub use pip::{PictureInPictureToggle, pip_icon};
pub use play_pause::{PlayPauseToggle, play_pause_icon};
pub use settings::{
    PanelRow, SETTINGS_PANEL_MARKER, SettingsPanel, SettingsSlot, SettingsToggle,
    next_playback_rate, settings_icon,
};
pub use stop::StopButton;
pub use volume::{MuteToggle, volume_icon};
