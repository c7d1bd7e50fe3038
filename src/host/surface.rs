/// Configuration handed to the surface when a control is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlOptions {
    /// Prefix used to resolve the control's icon assets
    pub icon_base_path: String,
    /// Text label; also the fallback content when the icon cannot load
    pub label: String,
    /// Icon shown before the first state synchronization
    pub icon: String,
    /// Whether swallowed failures are logged
    pub log: bool,
}

/// The host's control bar and root element.
///
/// Implementations own the actual widgets; the engine only decides which
/// controls exist and in what order.
pub trait ControlSurface: Send + Sync + 'static {
    /// Remove a default control by identifier. Returns whether it existed.
    fn remove_control(&self, id: &str) -> bool;

    /// Append a custom control to the control bar.
    fn add_control(&self, id: &str, options: &ControlOptions);

    /// Mount the big overlay shown over the video surface.
    fn mount_overlay(&self, options: &ControlOptions);

    /// Whether an element with `marker` is attached to the player root.
    fn has_panel(&self, marker: &str) -> bool;

    /// Attach an element identified by `marker` to the player root.
    fn attach_panel(&self, marker: &str);
}
