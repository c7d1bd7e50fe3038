//! Control buttons and the toggle coordinators layered on them.

mod button;
/// Toggle coordinators: click behaviour and state→icon mapping per control
pub mod toggles;

pub use button::{
    ButtonSpec, ClickHandler, ControlButton, ControlError, ICON_WRAPPER_CLASS, RenderedContent,
};
