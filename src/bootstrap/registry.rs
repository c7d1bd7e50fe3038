use std::{collections::HashMap, sync::Arc};

use crate::{
    controls::{
        ButtonSpec, ControlButton,
        toggles::{
            FullscreenToggle, MuteToggle, PictureInPictureToggle, PlayPauseToggle, SettingsSlot,
            SettingsToggle, StopButton, fullscreen_icon, pip_icon, play_pause_icon,
            settings_icon, volume_icon,
        },
    },
    host::{ControlSurface, HostPlayer, PictureInPicture, PlayerState},
    sync::OverlayReset,
};

/// Play/pause toggle identifier.
pub const PLAY_TOGGLE: &str = "playToggle";
/// Stop button identifier.
pub const STOP_BUTTON: &str = "stopButton";
/// Mute/volume toggle identifier.
pub const MUTE_TOGGLE: &str = "muteToggle";
/// Picture-in-picture toggle identifier.
pub const PIP_TOGGLE: &str = "pipToggle";
/// Settings toggle identifier.
pub const SETTINGS_TOGGLE: &str = "settingsToggle";
/// Fullscreen toggle identifier.
pub const FULLSCREEN_TOGGLE: &str = "fullscreenToggle";

/// Visual order of the built-in controls.
pub const CONTROL_ORDER: [&str; 6] = [
    PLAY_TOGGLE,
    STOP_BUTTON,
    MUTE_TOGGLE,
    PIP_TOGGLE,
    SETTINGS_TOGGLE,
    FULLSCREEN_TOGGLE,
];

/// Everything a factory may need to build its control.
pub struct ControlContext<'a> {
    /// Player the control drives
    pub player: &'a Arc<dyn HostPlayer>,
    /// Surface the control is mounted on
    pub surface: &'a Arc<dyn ControlSurface>,
    /// Page-wide picture-in-picture capability
    pub pip: &'a Arc<dyn PictureInPicture>,
    /// Big overlay, already mounted
    pub overlay: &'a Arc<ControlButton>,
    /// Deferred overlay reset shared with the synchronization layer
    pub overlay_reset: &'a OverlayReset,
    /// Home of the lazily created settings panel
    pub settings: &'a Arc<SettingsSlot>,
    /// Player state when the controls are installed
    pub state: &'a PlayerState,
}

/// What a factory produces: the button and the icon it starts with.
pub struct ControlDefinition {
    /// Button identity and behaviour
    pub spec: ButtonSpec,
    /// Icon rendered when the control is installed
    pub icon: &'static str,
}

/// Builds one control.
pub type ControlFactory = Box<dyn Fn(&ControlContext<'_>) -> ControlDefinition + Send + Sync>;

/// Maps control identifiers to factories, in installation order.
///
/// Registering an identifier that already exists replaces its factory but
/// keeps its position.
#[derive(Default)]
pub struct ControlRegistry {
    factories: HashMap<String, ControlFactory>,
    order: Vec<String>,
}

impl ControlRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in controls in [`CONTROL_ORDER`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(PLAY_TOGGLE, |ctx| ControlDefinition {
            spec: ButtonSpec::new(PLAY_TOGGLE, "Play").on_click(PlayPauseToggle),
            icon: play_pause_icon(ctx.state.paused),
        });
        registry.register(STOP_BUTTON, |ctx| ControlDefinition {
            spec: ButtonSpec::new(STOP_BUTTON, "Stop")
                .on_click(StopButton::new(Arc::clone(ctx.overlay), ctx.overlay_reset.clone())),
            icon: "stop",
        });
        registry.register(MUTE_TOGGLE, |ctx| ControlDefinition {
            spec: ButtonSpec::new(MUTE_TOGGLE, "Mute").on_click(MuteToggle),
            icon: volume_icon(ctx.state.muted, ctx.state.volume),
        });
        registry.register(PIP_TOGGLE, |ctx| ControlDefinition {
            spec: ButtonSpec::new(PIP_TOGGLE, "Picture-in-Picture")
                .on_click(PictureInPictureToggle::new(Arc::clone(ctx.pip))),
            icon: pip_icon(ctx.state.picture_in_picture_active),
        });
        registry.register(SETTINGS_TOGGLE, |ctx| ControlDefinition {
            spec: ButtonSpec::new(SETTINGS_TOGGLE, "Settings").on_click(SettingsToggle::new(
                Arc::clone(ctx.surface),
                Arc::clone(ctx.settings),
            )),
            icon: settings_icon(false),
        });
        registry.register(FULLSCREEN_TOGGLE, |ctx| ControlDefinition {
            spec: ButtonSpec::new(FULLSCREEN_TOGGLE, "Fullscreen").on_click(FullscreenToggle),
            icon: fullscreen_icon(ctx.state.is_fullscreen),
        });

        registry
    }

    /// Register `factory` under `id`.
    pub fn register<F>(&mut self, id: &str, factory: F)
    where
        F: Fn(&ControlContext<'_>) -> ControlDefinition + Send + Sync + 'static,
    {
        if !self.factories.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.factories.insert(id.to_string(), Box::new(factory));
    }

    /// Registered identifiers in installation order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Run the factory for `id`.
    pub fn build(&self, id: &str, ctx: &ControlContext<'_>) -> Option<ControlDefinition> {
        self.factories.get(id).map(|factory| factory(ctx))
    }
}

impl std::fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlRegistry")
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_control_order() {
        let registry = ControlRegistry::with_defaults();
        assert_eq!(registry.ids(), CONTROL_ORDER.map(String::from).as_slice());
    }

    #[test]
    fn replacing_keeps_position() {
        let mut registry = ControlRegistry::with_defaults();
        registry.register(MUTE_TOGGLE, |_| ControlDefinition {
            spec: ButtonSpec::new(MUTE_TOGGLE, "Volume"),
            icon: "audio_full",
        });
        registry.register("chapters", |_| ControlDefinition {
            spec: ButtonSpec::new("chapters", "Chapters"),
            icon: "chapters",
        });

        assert_eq!(registry.ids()[2], MUTE_TOGGLE);
        assert_eq!(registry.ids().last().map(String::as_str), Some("chapters"));
        assert_eq!(registry.ids().len(), CONTROL_ORDER.len() + 1);
    }
}
