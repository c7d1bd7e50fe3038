use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::debug;

use crate::{
    common::Property,
    controls::{ClickHandler, ControlButton, ControlError},
    host::{ControlSurface, HostPlayer},
};

/// Marker identifying the settings panel on the player root.
pub const SETTINGS_PANEL_MARKER: &str = "controlbar-settings-panel";

const MAX_PLAYBACK_RATE: f64 = 2.0;
const PLAYBACK_RATE_STEP: f64 = 0.25;

/// `gear_open` while the panel is shown, `gear` otherwise.
pub fn settings_icon(open: bool) -> &'static str {
    if open { "gear_open" } else { "gear" }
}

/// Next value of the playback-speed row.
///
/// Steps by 0.25 (rounded to two decimals) and wraps to 1.0 once the rate
/// reaches 2.0.
pub fn next_playback_rate(rate: f64) -> f64 {
    if rate >= MAX_PLAYBACK_RATE {
        1.0
    } else {
        ((rate + PLAYBACK_RATE_STEP) * 100.0).round() / 100.0
    }
}

/// Rows of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    /// Steps the playback rate
    PlaybackSpeed,
    /// Placeholder for quality selection
    Quality,
}

/// The settings panel attached to the player root.
///
/// Holds only its visibility and the rate it displays; the displayed rate
/// mirrors the player's rate and is never read back as a source of truth.
#[derive(Debug)]
pub struct SettingsPanel {
    visible: Property<bool>,
    displayed_rate: Property<f64>,
}

impl SettingsPanel {
    fn new() -> Self {
        Self {
            visible: Property::new(false),
            displayed_rate: Property::new(1.0),
        }
    }

    /// Whether the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Visibility, watchable.
    pub fn visible(&self) -> &Property<bool> {
        &self.visible
    }

    /// The playback rate the speed row displays.
    pub fn displayed_rate(&self) -> &Property<f64> {
        &self.displayed_rate
    }

    /// Show or hide the panel, returning the new visibility.
    ///
    /// Opening refreshes the displayed rate from `rate`.
    pub fn toggle(&self, rate: f64) -> bool {
        let open = !self.visible.get();
        if open {
            self.displayed_rate.set(rate);
        }
        self.visible.set(open);
        open
    }

    /// Activate a row. Returns the new rate when the speed row was used.
    pub fn activate(&self, row: PanelRow, player: &dyn HostPlayer) -> Option<f64> {
        match row {
            PanelRow::PlaybackSpeed => Some(self.step_playback_rate(player)),
            PanelRow::Quality => {
                debug!("Quality selection is not available");
                None
            }
        }
    }

    /// Advance the playback rate, writing the display and the player with
    /// the same value.
    pub fn step_playback_rate(&self, player: &dyn HostPlayer) -> f64 {
        let next = next_playback_rate(player.playback_rate());
        self.displayed_rate.set(next);
        player.set_playback_rate(next);
        next
    }

    pub(crate) fn show_rate(&self, rate: f64) {
        self.displayed_rate.set(rate);
    }
}

/// Lazily created, per-player home of the settings panel.
#[derive(Debug, Default)]
pub struct SettingsSlot {
    panel: OnceLock<Arc<SettingsPanel>>,
}

impl SettingsSlot {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The panel, if it was ever opened.
    pub fn get(&self) -> Option<Arc<SettingsPanel>> {
        self.panel.get().cloned()
    }

    /// Return the panel, creating and attaching it on first use.
    ///
    /// The surface is asked to attach the marker only if it is not already
    /// present, so at most one panel exists per player.
    pub fn ensure(&self, surface: &dyn ControlSurface) -> Arc<SettingsPanel> {
        let panel = self.panel.get_or_init(|| {
            if !surface.has_panel(SETTINGS_PANEL_MARKER) {
                surface.attach_panel(SETTINGS_PANEL_MARKER);
            }
            Arc::new(SettingsPanel::new())
        });
        Arc::clone(panel)
    }
}

/// Opens and closes the settings panel.
#[derive(Clone)]
pub struct SettingsToggle {
    surface: Arc<dyn ControlSurface>,
    slot: Arc<SettingsSlot>,
}

impl SettingsToggle {
    /// Toggle creating its panel on `surface` and keeping it in `slot`.
    pub fn new(surface: Arc<dyn ControlSurface>, slot: Arc<SettingsSlot>) -> Self {
        Self { surface, slot }
    }
}

impl std::fmt::Debug for SettingsToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsToggle")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ClickHandler for SettingsToggle {
    async fn on_click(
        &self,
        button: &Arc<ControlButton>,
        player: &Arc<dyn HostPlayer>,
    ) -> Result<(), ControlError> {
        let panel = self.slot.ensure(self.surface.as_ref());
        let open = panel.toggle(player.playback_rate());
        button.update_icon(settings_icon(open));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimSurface, SimulatedPlayer};

    #[test]
    fn rate_steps_then_wraps() {
        let mut rate = 1.0;
        let mut seen = Vec::new();
        for _ in 0..5 {
            rate = next_playback_rate(rate);
            seen.push(rate);
        }
        assert_eq!(seen, vec![1.25, 1.5, 1.75, 2.0, 1.0]);
    }

    #[test]
    fn rate_above_range_wraps() {
        assert_eq!(next_playback_rate(3.0), 1.0);
        assert_eq!(next_playback_rate(0.5), 0.75);
        assert_eq!(next_playback_rate(1.1), 1.35);
    }

    #[test]
    fn ensure_attaches_once() {
        let surface = SimSurface::new();
        let slot = SettingsSlot::new();

        let first = slot.ensure(&surface);
        let second = slot.ensure(&surface);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(surface.panels(), vec![SETTINGS_PANEL_MARKER.to_string()]);
    }

    #[test]
    fn ensure_reuses_existing_marker() {
        let surface = SimSurface::new();
        surface.attach_panel(SETTINGS_PANEL_MARKER);

        SettingsSlot::new().ensure(&surface);

        assert_eq!(surface.panels().len(), 1);
    }

    #[test]
    fn display_and_player_agree() {
        let player = SimulatedPlayer::new("video");
        let panel = SettingsSlot::new().ensure(&SimSurface::new());

        for _ in 0..5 {
            let rate = panel.step_playback_rate(&player);
            assert_eq!(panel.displayed_rate().get(), rate);
            assert_eq!(player.playback_rate(), rate);
        }
        assert_eq!(player.playback_rate(), 1.0);
    }

    #[test]
    fn quality_row_is_inert() {
        let player = SimulatedPlayer::new("video");
        let panel = SettingsSlot::new().ensure(&SimSurface::new());

        assert_eq!(panel.activate(PanelRow::Quality, &player), None);
        assert_eq!(player.playback_rate(), 1.0);
    }

    #[test]
    fn opening_refreshes_rate() {
        let panel = SettingsSlot::new().ensure(&SimSurface::new());

        assert!(panel.toggle(1.5));
        assert_eq!(panel.displayed_rate().get(), 1.5);
        assert!(!panel.toggle(1.75));
        assert_eq!(panel.displayed_rate().get(), 1.5);
    }
}
