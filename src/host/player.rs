use std::{fmt, str::FromStr};

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::PlatformError;

/// Identity of a media element, as the platform sees it.
///
/// Picture-in-picture activity is page-wide: the platform reports which
/// element (if any) is currently shown, and a player compares it with its
/// own element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(pub String);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State-change notifications emitted by the host player.
///
/// Notifications carry no payload; handlers re-query the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    /// Playback started or resumed
    Play,
    /// Playback paused
    Pause,
    /// Playback reached the end of the media
    Ended,
    /// Volume or mute flag changed
    VolumeChange,
    /// Fullscreen was entered or exited
    FullscreenChange,
    /// Playback rate changed
    RateChange,
    /// The player's element entered picture-in-picture
    EnterPictureInPicture,
    /// The player's element left picture-in-picture
    LeavePictureInPicture,
}

impl PlayerEvent {
    /// Host-facing event name.
    pub fn name(self) -> &'static str {
        match self {
            PlayerEvent::Play => "play",
            PlayerEvent::Pause => "pause",
            PlayerEvent::Ended => "ended",
            PlayerEvent::VolumeChange => "volumechange",
            PlayerEvent::FullscreenChange => "fullscreenchange",
            PlayerEvent::RateChange => "ratechange",
            PlayerEvent::EnterPictureInPicture => "enterpictureinpicture",
            PlayerEvent::LeavePictureInPicture => "leavepictureinpicture",
        }
    }
}

impl FromStr for PlayerEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(PlayerEvent::Play),
            "pause" => Ok(PlayerEvent::Pause),
            "ended" => Ok(PlayerEvent::Ended),
            "volumechange" => Ok(PlayerEvent::VolumeChange),
            "fullscreenchange" => Ok(PlayerEvent::FullscreenChange),
            "ratechange" => Ok(PlayerEvent::RateChange),
            "enterpictureinpicture" => Ok(PlayerEvent::EnterPictureInPicture),
            "leavepictureinpicture" => Ok(PlayerEvent::LeavePictureInPicture),
            other => Err(format!("unknown player event '{other}'")),
        }
    }
}

/// Snapshot of the host player's playback state.
///
/// Not owned by the engine; captured on demand and never validated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Playback is paused (or not started)
    pub paused: bool,
    /// Audio is muted
    pub muted: bool,
    /// Volume in `[0, 1]`
    pub volume: f64,
    /// Player is in fullscreen
    pub is_fullscreen: bool,
    /// Current playback rate
    pub playback_rate: f64,
    /// This player's element is the page's picture-in-picture element
    pub picture_in_picture_active: bool,
    /// Position in seconds
    pub current_time: f64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            paused: true,
            muted: false,
            volume: 1.0,
            is_fullscreen: false,
            playback_rate: 1.0,
            picture_in_picture_active: false,
            current_time: 0.0,
        }
    }
}

/// The host player runtime.
///
/// Queries are synchronous reads of live state. Actions that the platform
/// may refuse are fallible; `play`, `request_fullscreen` and
/// `exit_fullscreen` may suspend.
#[async_trait]
pub trait HostPlayer: Send + Sync + 'static {
    /// Subscribe to state-change notifications.
    fn events(&self) -> broadcast::Receiver<PlayerEvent>;

    /// The media element backing this player.
    fn element(&self) -> ElementId;

    /// Whether playback is paused.
    fn paused(&self) -> bool;

    /// Whether audio is muted.
    fn muted(&self) -> bool;

    /// Volume in `[0, 1]`.
    fn volume(&self) -> f64;

    /// Whether the player is fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Current playback rate.
    fn playback_rate(&self) -> f64;

    /// Position in seconds.
    fn current_time(&self) -> f64;

    /// Start or resume playback.
    ///
    /// # Errors
    /// Returns `PlatformError::Rejected` if the platform refuses playback.
    async fn play(&self) -> Result<(), PlatformError>;

    /// Pause playback.
    fn pause(&self);

    /// Set the mute flag.
    fn set_muted(&self, muted: bool);

    /// Move the playback position.
    ///
    /// # Errors
    /// Returns `PlatformError::NotSeekable` if the media cannot be seeked.
    fn set_current_time(&self, seconds: f64) -> Result<(), PlatformError>;

    /// Set the playback rate.
    fn set_playback_rate(&self, rate: f64);

    /// Enter fullscreen.
    ///
    /// # Errors
    /// Returns an error if the platform rejects the request.
    async fn request_fullscreen(&self) -> Result<(), PlatformError>;

    /// Leave fullscreen.
    ///
    /// # Errors
    /// Returns an error if the platform rejects the request.
    async fn exit_fullscreen(&self) -> Result<(), PlatformError>;

    /// Capture every queryable field at once.
    ///
    /// The picture-in-picture flag needs the platform and is filled in by
    /// [`PlayerState::capture`].
    fn snapshot(&self) -> PlayerState {
        PlayerState {
            paused: self.paused(),
            muted: self.muted(),
            volume: self.volume(),
            is_fullscreen: self.is_fullscreen(),
            playback_rate: self.playback_rate(),
            picture_in_picture_active: false,
            current_time: self.current_time(),
        }
    }
}

impl PlayerState {
    /// Capture the full state of `player`, including whether its element is
    /// the platform's active picture-in-picture element.
    pub fn capture(player: &dyn HostPlayer, pip: &dyn super::PictureInPicture) -> Self {
        let element = player.element();
        Self {
            picture_in_picture_active: pip.active_element().as_ref() == Some(&element),
            ..player.snapshot()
        }
    }
}
