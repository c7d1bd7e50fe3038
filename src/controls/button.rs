use std::{
    any::Any,
    fmt,
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use futures::FutureExt;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::{
    assets::{AssetLoader, icon_path},
    common::{Property, lock},
    diagnostics::{Diagnostic, Diagnostics},
    host::{HostPlayer, PlatformError},
};

/// Class of the element icon markup is mounted in.
pub const ICON_WRAPPER_CLASS: &str = "controlbar-icon";

/// What a control currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedContent {
    /// Nothing rendered yet
    Empty,
    /// Icon markup inside the wrapper element
    Icon {
        /// Class of the wrapper element
        wrapper_class: &'static str,
        /// Loaded markup
        markup: Arc<str>,
    },
    /// Plain-text fallback after a failed load
    Text(String),
}

impl RenderedContent {
    /// Whether nothing is rendered.
    pub fn is_empty(&self) -> bool {
        match self {
            RenderedContent::Empty => true,
            RenderedContent::Icon { markup, .. } => markup.is_empty(),
            RenderedContent::Text(text) => text.is_empty(),
        }
    }

    /// The fallback text, if the control fell back to text.
    pub fn text(&self) -> Option<&str> {
        match self {
            RenderedContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The icon markup, if an icon is mounted.
    pub fn markup(&self) -> Option<&str> {
        match self {
            RenderedContent::Icon { markup, .. } => Some(markup),
            _ => None,
        }
    }
}

/// Errors a click handler may return.
#[derive(Error, Debug)]
pub enum ControlError {
    /// A host or platform call failed
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Behaviour attached to a control's click.
#[async_trait]
pub trait ClickHandler: Send + Sync + 'static {
    /// React to a click on `button`.
    ///
    /// # Errors
    /// Any error is caught by [`ControlButton::handle_click`] and reported
    /// as a diagnostic.
    async fn on_click(
        &self,
        button: &Arc<ControlButton>,
        player: &Arc<dyn HostPlayer>,
    ) -> Result<(), ControlError>;
}

/// Identity and behaviour of a control, before it is bound to a loader.
#[derive(Clone)]
pub struct ButtonSpec {
    /// Control identifier on the surface
    pub id: String,
    /// Text label; empty means "use the icon name"
    pub label: String,
    /// Click behaviour, if the control is interactive
    pub handler: Option<Arc<dyn ClickHandler>>,
}

impl ButtonSpec {
    /// A spec with a label and no click behaviour.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            handler: None,
        }
    }

    /// Attach click behaviour.
    pub fn on_click(mut self, handler: impl ClickHandler) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }
}

#[derive(Debug, Default)]
struct IconState {
    current: Option<String>,
    generation: u64,
}

/// A stateful icon button.
///
/// The current icon identity changes only through
/// [`ControlButton::update_icon`]. Each update loads its asset in its own
/// task; a generation counter makes sure only the most recent update is
/// rendered, whatever order the loads complete in.
pub struct ControlButton {
    id: String,
    label: String,
    icon_base_path: String,
    icon: Mutex<IconState>,
    content: Property<RenderedContent>,
    loader: AssetLoader,
    handler: Option<Arc<dyn ClickHandler>>,
    diagnostics: Diagnostics,
}

impl ControlButton {
    /// Bind `spec` to an asset loader.
    pub fn new(
        spec: ButtonSpec,
        icon_base_path: impl Into<String>,
        loader: AssetLoader,
        diagnostics: Diagnostics,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: spec.id,
            label: spec.label,
            icon_base_path: icon_base_path.into(),
            icon: Mutex::new(IconState::default()),
            content: Property::new(RenderedContent::Empty),
            loader,
            handler: spec.handler,
            diagnostics,
        })
    }

    /// Control identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Text label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Prefix used to resolve this control's icons.
    pub fn icon_base_path(&self) -> &str {
        &self.icon_base_path
    }

    /// The icon most recently requested, whether or not it has rendered.
    pub fn current_icon(&self) -> Option<String> {
        lock(&self.icon).current.clone()
    }

    /// What the control currently shows.
    pub fn content(&self) -> &Property<RenderedContent> {
        &self.content
    }

    /// Show the icon called `name`.
    ///
    /// Does nothing if `name` is empty or already the current icon.
    /// Otherwise records `name` as current immediately and returns the task
    /// loading and rendering it. On load failure the label (or `name` when
    /// there is no label) is rendered as text.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime when a load has to be
    /// spawned.
    pub fn update_icon(self: &Arc<Self>, name: &str) -> Option<JoinHandle<()>> {
        if name.is_empty() {
            return None;
        }

        let generation = {
            let mut icon = lock(&self.icon);
            if icon.current.as_deref() == Some(name) {
                debug!(control = %self.id, icon = name, "Icon unchanged");
                return None;
            }
            icon.current = Some(name.to_string());
            icon.generation += 1;
            icon.generation
        };

        let button = Arc::clone(self);
        let name = name.to_string();
        Some(tokio::spawn(async move {
            button.render(&name, generation).await;
        }))
    }

    #[instrument(skip(self), fields(control = %self.id))]
    async fn render(&self, name: &str, generation: u64) {
        let path = icon_path(&self.icon_base_path, name);
        let content = match self.loader.load(&path).await {
            Some(markup) => RenderedContent::Icon {
                wrapper_class: ICON_WRAPPER_CLASS,
                markup,
            },
            None => RenderedContent::Text(self.fallback_text(name)),
        };

        let icon = lock(&self.icon);
        if icon.generation != generation {
            debug!(superseded_by = ?icon.current, "Discarding superseded icon");
            return;
        }
        self.content.set(content);
    }

    fn fallback_text(&self, name: &str) -> String {
        if self.label.is_empty() {
            name.to_string()
        } else {
            self.label.clone()
        }
    }

    /// Run the click handler.
    ///
    /// Errors and panics raised by the handler are reported as diagnostics
    /// and never reach the caller.
    pub async fn handle_click(self: &Arc<Self>, player: Arc<dyn HostPlayer>) {
        let Some(handler) = self.handler.clone() else {
            return;
        };

        let outcome = AssertUnwindSafe(handler.on_click(self, &player))
            .catch_unwind()
            .await;

        let diagnostic = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(ControlError::Platform(e))) => Diagnostic::PlatformRejected {
                control: self.id.clone(),
                reason: e.to_string(),
            },
            Err(panic) => Diagnostic::ClickFailed {
                control: self.id.clone(),
                reason: panic_message(panic.as_ref()),
            },
        };
        self.diagnostics.report(diagnostic);
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("handler panicked: {message}")
    } else {
        "handler panicked".to_string()
    }
}

impl fmt::Debug for ControlButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlButton")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("current_icon", &self.current_icon())
            .field("content", &self.content.get())
            .finish_non_exhaustive()
    }
}
