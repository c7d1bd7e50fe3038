//! Installs the engine on a host player.
//!
//! Installation removes the default controls being replaced, mounts the
//! overlay, builds every registered control in order, renders initial
//! icons and starts the synchronization task. Nothing is torn down
//! explicitly; the engine lives as long as its handle.

mod registry;

pub use registry::{
    CONTROL_ORDER, ControlContext, ControlDefinition, ControlFactory, ControlRegistry,
    FULLSCREEN_TOGGLE, MUTE_TOGGLE, PIP_TOGGLE, PLAY_TOGGLE, SETTINGS_TOGGLE, STOP_BUTTON,
};

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::{
    ControlBarError, Result,
    assets::{AssetCache, AssetLoader},
    config::EngineConfig,
    controls::{
        ButtonSpec, ControlButton,
        toggles::{PanelRow, SettingsPanel, SettingsSlot},
    },
    diagnostics::Diagnostics,
    host::{AssetTransport, ControlOptions, ControlSurface, HostPlayer, PictureInPicture, PlayerState},
    sync::{OVERLAY_PLAY_ICON, OverlayClick, OverlayReset, SyncLayer, SyncTargets},
};

/// Default controls the engine's controls replace.
pub const REPLACED_DEFAULTS: [&str; 5] = [
    "PlayToggle",
    "VolumePanel",
    "PlaybackRateMenuButton",
    "PictureInPictureToggle",
    "FullscreenToggle",
];

/// Identifier of the big overlay.
pub const OVERLAY: &str = "bigOverlay";

/// The collaborators an engine is installed against.
#[derive(Clone)]
pub struct HostBindings {
    /// Host player
    pub player: Arc<dyn HostPlayer>,
    /// Control bar and player root
    pub surface: Arc<dyn ControlSurface>,
    /// Page-wide picture-in-picture capability
    pub pip: Arc<dyn PictureInPicture>,
    /// Icon asset transport
    pub transport: Arc<dyn AssetTransport>,
}

/// How an engine is installed.
pub struct EngineOptions {
    /// Engine configuration
    pub config: EngineConfig,
    /// Cache for loaded icons; defaults to the process-wide cache
    pub cache: AssetCache,
    /// Controls to install
    pub registry: ControlRegistry,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EngineOptions {
    /// Built-in controls with the process-wide cache.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cache: AssetCache::global(),
            registry: ControlRegistry::with_defaults(),
        }
    }

    /// Use `cache` instead of the process-wide cache.
    pub fn with_cache(mut self, cache: AssetCache) -> Self {
        self.cache = cache;
        self
    }

    /// Install the controls of `registry` instead of the built-in set.
    pub fn with_registry(mut self, registry: ControlRegistry) -> Self {
        self.registry = registry;
        self
    }
}

/// A running engine attached to one player.
pub struct Engine {
    player: Arc<dyn HostPlayer>,
    controls: Vec<Arc<ControlButton>>,
    overlay: Arc<ControlButton>,
    settings: Arc<SettingsSlot>,
    diagnostics: Diagnostics,
    sync_task: JoinHandle<()>,
}

impl Engine {
    /// Install the engine on `host`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime, since icon loads and the
    /// synchronization task are spawned onto it.
    ///
    /// # Errors
    ///
    /// Returns `ControlBarError::MissingControl` if the registry lacks one
    /// of the state-driven controls the synchronization layer needs.
    #[instrument(skip_all, fields(element = %host.player.element()))]
    pub fn install(host: HostBindings, options: EngineOptions) -> Result<Self> {
        let EngineOptions {
            mut config,
            cache,
            registry,
        } = options;
        config.normalize();

        let diagnostics = Diagnostics::new(config.log);
        let loader = AssetLoader::new(Arc::clone(&host.transport), cache, diagnostics.clone());
        let events = host.player.events();

        for id in REPLACED_DEFAULTS {
            if !host.surface.remove_control(id) {
                debug!(control = id, "Default control not present");
            }
        }

        let overlay = ControlButton::new(
            ButtonSpec::new(OVERLAY, "").on_click(OverlayClick),
            config.icon_base_path.clone(),
            loader.clone(),
            diagnostics.clone(),
        );
        host.surface
            .mount_overlay(&control_options(&config, "", OVERLAY_PLAY_ICON));
        overlay.update_icon(OVERLAY_PLAY_ICON);

        let settings = Arc::new(SettingsSlot::new());
        let overlay_reset = OverlayReset::new();
        let state = PlayerState::capture(host.player.as_ref(), host.pip.as_ref());
        let ctx = ControlContext {
            player: &host.player,
            surface: &host.surface,
            pip: &host.pip,
            overlay: &overlay,
            overlay_reset: &overlay_reset,
            settings: &settings,
            state: &state,
        };

        let mut controls = Vec::with_capacity(registry.ids().len());
        for id in registry.ids() {
            let Some(definition) = registry.build(id, &ctx) else {
                continue;
            };
            let options = control_options(&config, &definition.spec.label, definition.icon);
            let button = ControlButton::new(
                definition.spec,
                config.icon_base_path.clone(),
                loader.clone(),
                diagnostics.clone(),
            );
            host.surface.add_control(id, &options);
            button.update_icon(definition.icon);
            controls.push(button);
        }

        let find = |id: &str| {
            controls
                .iter()
                .find(|button| button.id() == id)
                .cloned()
                .ok_or_else(|| ControlBarError::MissingControl(id.to_string()))
        };
        let targets = SyncTargets {
            play_pause: find(PLAY_TOGGLE)?,
            volume: find(MUTE_TOGGLE)?,
            fullscreen: find(FULLSCREEN_TOGGLE)?,
            picture_in_picture: find(PIP_TOGGLE)?,
            overlay: Arc::clone(&overlay),
        };

        let sync = SyncLayer::new(
            Arc::clone(&host.player),
            Arc::clone(&host.pip),
            targets,
            Arc::clone(&settings),
            overlay_reset,
        );
        let sync_task = sync.spawn(events);

        info!(controls = controls.len(), "Installed player controls");

        Ok(Self {
            player: host.player,
            controls,
            overlay,
            settings,
            diagnostics,
            sync_task,
        })
    }

    /// Installed controls in visual order.
    pub fn controls(&self) -> &[Arc<ControlButton>] {
        &self.controls
    }

    /// The control registered as `id`.
    pub fn control(&self, id: &str) -> Option<Arc<ControlButton>> {
        self.controls.iter().find(|button| button.id() == id).cloned()
    }

    /// The big overlay.
    pub fn overlay(&self) -> &Arc<ControlButton> {
        &self.overlay
    }

    /// The settings panel, once it has been opened.
    pub fn settings_panel(&self) -> Option<Arc<SettingsPanel>> {
        self.settings.get()
    }

    /// Sink of swallowed failures.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Dispatch a click to control `id`, as the host's click dispatch would.
    ///
    /// Returns `false` if no such control exists.
    pub async fn click(&self, id: &str) -> bool {
        if id == OVERLAY {
            self.overlay.handle_click(Arc::clone(&self.player)).await;
            return true;
        }
        match self.control(id) {
            Some(button) => {
                button.handle_click(Arc::clone(&self.player)).await;
                true
            }
            None => false,
        }
    }

    /// Activate a settings panel row. Does nothing until the panel exists.
    pub fn activate_panel_row(&self, row: PanelRow) -> Option<f64> {
        self.settings
            .get()
            .and_then(|panel| panel.activate(row, self.player.as_ref()))
    }
}

fn control_options(config: &EngineConfig, label: &str, icon: &str) -> ControlOptions {
    ControlOptions {
        icon_base_path: config.icon_base_path.clone(),
        label: label.to_string(),
        icon: icon.to_string(),
        log: config.log,
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.sync_task.abort();
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("controls", &self.controls)
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}
