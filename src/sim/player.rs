use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::{
    common::Property,
    host::{ElementId, HostPlayer, PlatformError, PlayerEvent, PlayerState},
};

const EVENT_CAPACITY: usize = 64;

/// A player whose state lives in memory.
///
/// Actions update the state and emit the notification a real player would,
/// only when the state actually changed. Fullscreen and seeking can be made
/// to fail.
#[derive(Debug)]
pub struct SimulatedPlayer {
    element: ElementId,
    state: Property<PlayerState>,
    events: broadcast::Sender<PlayerEvent>,
    reject_fullscreen: AtomicBool,
    reject_play: AtomicBool,
    seekable: AtomicBool,
}

impl SimulatedPlayer {
    /// Create a paused player at full volume backed by `element`.
    pub fn new(element: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            element: ElementId(element.into()),
            state: Property::new(PlayerState::default()),
            events,
            reject_fullscreen: AtomicBool::new(false),
            reject_play: AtomicBool::new(false),
            seekable: AtomicBool::new(true),
        }
    }

    /// Live player state.
    pub fn state(&self) -> &Property<PlayerState> {
        &self.state
    }

    /// Sender used to deliver notifications to subscribers.
    pub fn event_sender(&self) -> broadcast::Sender<PlayerEvent> {
        self.events.clone()
    }

    /// Deliver a notification without changing state.
    pub fn emit(&self, event: PlayerEvent) {
        let _ = self.events.send(event);
    }

    /// Make fullscreen requests and exits fail.
    pub fn set_reject_fullscreen(&self, reject: bool) {
        self.reject_fullscreen.store(reject, Ordering::SeqCst);
    }

    /// Make `play` fail, as an autoplay policy would.
    pub fn set_reject_play(&self, reject: bool) {
        self.reject_play.store(reject, Ordering::SeqCst);
    }

    /// Control whether `set_current_time` succeeds.
    pub fn set_seekable(&self, seekable: bool) {
        self.seekable.store(seekable, Ordering::SeqCst);
    }

    /// Change the volume, emitting `volumechange`.
    pub fn set_volume(&self, volume: f64) {
        self.change(PlayerEvent::VolumeChange, |state| {
            state.volume = volume.clamp(0.0, 1.0);
        });
    }

    /// Reach the end of the media, emitting `ended`.
    pub fn finish(&self) {
        self.state.update(|state| state.paused = true);
        self.emit(PlayerEvent::Ended);
    }

    fn change(&self, event: PlayerEvent, edit: impl FnOnce(&mut PlayerState)) {
        let before = self.state.get();
        let mut next = before.clone();
        edit(&mut next);
        if next != before {
            self.state.set(next);
            self.emit(event);
        }
    }
}

#[async_trait]
impl HostPlayer for SimulatedPlayer {
    fn events(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    fn element(&self) -> ElementId {
        self.element.clone()
    }

    fn paused(&self) -> bool {
        self.state.get().paused
    }

    fn muted(&self) -> bool {
        self.state.get().muted
    }

    fn volume(&self) -> f64 {
        self.state.get().volume
    }

    fn is_fullscreen(&self) -> bool {
        self.state.get().is_fullscreen
    }

    fn playback_rate(&self) -> f64 {
        self.state.get().playback_rate
    }

    fn current_time(&self) -> f64 {
        self.state.get().current_time
    }

    async fn play(&self) -> Result<(), PlatformError> {
        if self.reject_play.load(Ordering::SeqCst) {
            return Err(PlatformError::rejected("play", "playback blocked"));
        }
        self.change(PlayerEvent::Play, |state| state.paused = false);
        Ok(())
    }

    fn pause(&self) {
        self.change(PlayerEvent::Pause, |state| state.paused = true);
    }

    fn set_muted(&self, muted: bool) {
        self.change(PlayerEvent::VolumeChange, |state| state.muted = muted);
    }

    fn set_current_time(&self, seconds: f64) -> Result<(), PlatformError> {
        if !self.seekable.load(Ordering::SeqCst) {
            return Err(PlatformError::NotSeekable);
        }
        self.state.update(|state| state.current_time = seconds.max(0.0));
        Ok(())
    }

    fn set_playback_rate(&self, rate: f64) {
        self.change(PlayerEvent::RateChange, |state| state.playback_rate = rate);
    }

    async fn request_fullscreen(&self) -> Result<(), PlatformError> {
        if self.reject_fullscreen.load(Ordering::SeqCst) {
            return Err(PlatformError::rejected(
                "request fullscreen",
                "not triggered by user activation",
            ));
        }
        self.change(PlayerEvent::FullscreenChange, |state| {
            state.is_fullscreen = true;
        });
        Ok(())
    }

    async fn exit_fullscreen(&self) -> Result<(), PlatformError> {
        if self.reject_fullscreen.load(Ordering::SeqCst) {
            return Err(PlatformError::rejected(
                "exit fullscreen",
                "document is not fullscreen",
            ));
        }
        self.change(PlayerEvent::FullscreenChange, |state| {
            state.is_fullscreen = false;
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn actions_emit_only_on_change() {
        let player = SimulatedPlayer::new("video-1");
        let mut events = player.events();

        player.pause();
        assert!(events.try_recv().is_err());

        player.play().await.unwrap();
        player.set_muted(true);
        assert_eq!(events.try_recv().unwrap(), PlayerEvent::Play);
        assert_eq!(events.try_recv().unwrap(), PlayerEvent::VolumeChange);
        assert!(!player.paused());
        assert!(player.muted());
    }

    #[tokio::test]
    async fn rejections_leave_state_alone() {
        let player = SimulatedPlayer::new("video-1");
        player.set_reject_fullscreen(true);
        player.set_seekable(false);

        assert!(player.request_fullscreen().await.is_err());
        assert!(!player.is_fullscreen());
        assert_eq!(
            player.set_current_time(0.0),
            Err(PlatformError::NotSeekable)
        );
    }
}
