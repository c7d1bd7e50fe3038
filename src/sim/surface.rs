use std::sync::Mutex;

use super::lock;
use crate::host::{ControlOptions, ControlSurface};

/// Controls a freshly created host player carries.
pub const DEFAULT_CONTROLS: [&str; 7] = [
    "PlayToggle",
    "VolumePanel",
    "CurrentTimeDisplay",
    "ProgressControl",
    "PlaybackRateMenuButton",
    "PictureInPictureToggle",
    "FullscreenToggle",
];

#[derive(Debug, Default)]
struct SurfaceState {
    controls: Vec<(String, Option<ControlOptions>)>,
    overlay: Option<ControlOptions>,
    panels: Vec<String>,
}

/// Control bar that records what was mounted where.
#[derive(Debug)]
pub struct SimSurface {
    state: Mutex<SurfaceState>,
}

impl Default for SimSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl SimSurface {
    /// A surface holding [`DEFAULT_CONTROLS`].
    pub fn new() -> Self {
        let controls = DEFAULT_CONTROLS
            .iter()
            .map(|id| (id.to_string(), None))
            .collect();
        Self {
            state: Mutex::new(SurfaceState {
                controls,
                ..SurfaceState::default()
            }),
        }
    }

    /// Identifiers of every control in visual order.
    pub fn control_ids(&self) -> Vec<String> {
        lock(&self.state)
            .controls
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Options a custom control was mounted with.
    pub fn options(&self, id: &str) -> Option<ControlOptions> {
        lock(&self.state)
            .controls
            .iter()
            .find(|(control, _)| control == id)
            .and_then(|(_, options)| options.clone())
    }

    /// Options the overlay was mounted with.
    pub fn overlay(&self) -> Option<ControlOptions> {
        lock(&self.state).overlay.clone()
    }

    /// Markers of every element attached to the player root.
    pub fn panels(&self) -> Vec<String> {
        lock(&self.state).panels.clone()
    }
}

impl ControlSurface for SimSurface {
    fn remove_control(&self, id: &str) -> bool {
        let mut state = lock(&self.state);
        let before = state.controls.len();
        state.controls.retain(|(control, _)| control != id);
        state.controls.len() != before
    }

    fn add_control(&self, id: &str, options: &ControlOptions) {
        lock(&self.state)
            .controls
            .push((id.to_string(), Some(options.clone())));
    }

    fn mount_overlay(&self, options: &ControlOptions) {
        lock(&self.state).overlay = Some(options.clone());
    }

    fn has_panel(&self, marker: &str) -> bool {
        lock(&self.state).panels.iter().any(|panel| panel == marker)
    }

    fn attach_panel(&self, marker: &str) {
        lock(&self.state).panels.push(marker.to_string());
    }
}
