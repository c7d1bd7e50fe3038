use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{SimulatedPlayer, lock};
use crate::host::{ElementId, HostPlayer, PictureInPicture, PlatformError, PlayerEvent};

/// Page-wide picture-in-picture with a single active element.
///
/// Players attached with [`SimPictureInPicture::attach`] receive
/// `enterpictureinpicture` / `leavepictureinpicture` when their element
/// gains or loses the window.
#[derive(Debug)]
pub struct SimPictureInPicture {
    supported: bool,
    reject: AtomicBool,
    active: Mutex<Option<ElementId>>,
    listeners: Mutex<Vec<(ElementId, broadcast::Sender<PlayerEvent>)>>,
}

impl SimPictureInPicture {
    /// Create the capability; `supported = false` models an environment
    /// without picture-in-picture.
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            reject: AtomicBool::new(false),
            active: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Route notifications for `player`'s element to `player`.
    pub fn attach(&self, player: &SimulatedPlayer) {
        lock(&self.listeners).push((player.element(), player.event_sender()));
    }

    /// Make every request and exit fail.
    pub fn set_reject(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    /// Force the active element, as another player on the page would.
    pub fn set_active(&self, element: Option<ElementId>) {
        let previous = std::mem::replace(&mut *lock(&self.active), element.clone());
        self.notify(previous.as_ref(), PlayerEvent::LeavePictureInPicture);
        self.notify(element.as_ref(), PlayerEvent::EnterPictureInPicture);
    }

    fn notify(&self, element: Option<&ElementId>, event: PlayerEvent) {
        let Some(element) = element else {
            return;
        };
        for (listener, sender) in lock(&self.listeners).iter() {
            if listener == element {
                let _ = sender.send(event);
            }
        }
    }
}

#[async_trait]
impl PictureInPicture for SimPictureInPicture {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn active_element(&self) -> Option<ElementId> {
        lock(&self.active).clone()
    }

    async fn request(&self, element: &ElementId) -> Result<(), PlatformError> {
        if !self.supported {
            return Err(PlatformError::Unsupported {
                capability: "picture-in-picture",
            });
        }
        if self.reject.load(Ordering::SeqCst) {
            return Err(PlatformError::rejected(
                "request picture-in-picture",
                "video has no frames",
            ));
        }
        self.set_active(Some(element.clone()));
        Ok(())
    }

    async fn exit(&self) -> Result<(), PlatformError> {
        if self.reject.load(Ordering::SeqCst) || self.active_element().is_none() {
            return Err(PlatformError::rejected(
                "exit picture-in-picture",
                "no element is in picture-in-picture",
            ));
        }
        self.set_active(None);
        Ok(())
    }
}
