//! Icon asset resolution and loading.

mod cache;
mod loader;

pub use cache::AssetCache;
pub use loader::AssetLoader;

/// Suffix appended to every icon name.
pub const ICON_SUFFIX: &str = ".svg";

/// Resolve an icon name to its asset path.
pub fn icon_path(base_path: &str, name: &str) -> String {
    format!("{base_path}{name}{ICON_SUFFIX}")
}
