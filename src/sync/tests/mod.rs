//! Unit tests for the synchronization layer.
//! Drives `SyncLayer::apply` directly and waits on the loads it returns.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use crate::{
    assets::{AssetCache, AssetLoader},
    controls::{ButtonSpec, ControlButton, toggles::SettingsSlot},
    diagnostics::Diagnostics,
    host::{AssetTransport, HostPlayer, PictureInPicture, PlayerEvent},
    sim::{MemoryTransport, SimPictureInPicture, SimSurface, SimulatedPlayer},
    sync::{OverlayReset, SyncLayer, SyncTargets, overlay_icon},
};

const ICONS: [&str; 11] = [
    "play",
    "pause",
    "audio_mute",
    "audio_low",
    "audio_full",
    "full",
    "full_exit",
    "pip",
    "pip_exit",
    "bigplay",
    "bigpause",
];

struct Fixture {
    layer: SyncLayer,
    targets: SyncTargets,
    player: Arc<SimulatedPlayer>,
    pip: Arc<SimPictureInPicture>,
    transport: Arc<MemoryTransport>,
    settings: Arc<SettingsSlot>,
    overlay_reset: OverlayReset,
}

fn fixture() -> Fixture {
    let transport = Arc::new(MemoryTransport::new());
    for icon in ICONS {
        transport.insert(&format!("/icons/{icon}.svg"), &format!("<svg>{icon}</svg>"));
    }
    let diagnostics = Diagnostics::new(false);
    let loader = AssetLoader::new(
        Arc::clone(&transport) as Arc<dyn AssetTransport>,
        AssetCache::new(),
        diagnostics.clone(),
    );
    let button = |id: &str| {
        ControlButton::new(
            ButtonSpec::new(id, id),
            "/icons/",
            loader.clone(),
            diagnostics.clone(),
        )
    };
    let targets = SyncTargets {
        play_pause: button("play"),
        volume: button("mute"),
        fullscreen: button("fullscreen"),
        picture_in_picture: button("pip"),
        overlay: button("overlay"),
    };

    let player = Arc::new(SimulatedPlayer::new("video-1"));
    let pip = Arc::new(SimPictureInPicture::new(true));
    let settings = Arc::new(SettingsSlot::new());
    let overlay_reset = OverlayReset::new();
    let layer = SyncLayer::new(
        Arc::clone(&player) as Arc<dyn HostPlayer>,
        Arc::clone(&pip) as Arc<dyn PictureInPicture>,
        targets.clone(),
        Arc::clone(&settings),
        overlay_reset.clone(),
    );

    Fixture {
        layer,
        targets,
        player,
        pip,
        transport,
        settings,
        overlay_reset,
    }
}

async fn settle(handles: Vec<tokio::task::JoinHandle<()>>) {
    for handle in handles {
        handle.await.unwrap();
    }
}

#[test]
fn overlay_icons_per_event() {
    assert_eq!(overlay_icon(PlayerEvent::Play), Some("bigplay"));
    assert_eq!(overlay_icon(PlayerEvent::Pause), Some("bigpause"));
    assert_eq!(overlay_icon(PlayerEvent::Ended), Some("bigplay"));
    assert_eq!(overlay_icon(PlayerEvent::VolumeChange), None);
}

#[tokio::test]
async fn pause_then_play_requests_each_overlay_icon_once() {
    let f = fixture();
    f.player.play().await.unwrap();

    f.player.pause();
    let on_pause = f.layer.apply(PlayerEvent::Pause);
    f.player.play().await.unwrap();
    let on_play = f.layer.apply(PlayerEvent::Play);

    settle(on_pause).await;
    settle(on_play).await;

    assert_eq!(f.transport.request_count("/icons/bigpause.svg"), 1);
    assert_eq!(f.transport.request_count("/icons/bigplay.svg"), 1);
    assert_eq!(f.targets.overlay.current_icon().as_deref(), Some("bigplay"));
    assert_eq!(
        f.targets.overlay.content().get().markup(),
        Some("<svg>bigplay</svg>")
    );
    assert_eq!(
        f.targets.play_pause.content().get().markup(),
        Some("<svg>pause</svg>")
    );
}

#[tokio::test]
async fn armed_reset_turns_the_next_pause_into_bigplay() {
    let f = fixture();
    settle(f.layer.apply(PlayerEvent::Play)).await;

    f.overlay_reset.arm();
    f.player.pause();
    settle(f.layer.apply(PlayerEvent::Pause)).await;

    assert!(!f.overlay_reset.is_armed());
    assert_eq!(f.targets.overlay.current_icon().as_deref(), Some("bigplay"));
    assert_eq!(f.transport.request_count("/icons/bigpause.svg"), 0);

    f.player.play().await.unwrap();
    settle(f.layer.apply(PlayerEvent::Play)).await;
    f.player.pause();
    settle(f.layer.apply(PlayerEvent::Pause)).await;

    assert_eq!(
        f.targets.overlay.content().get().markup(),
        Some("<svg>bigpause</svg>")
    );
}

#[tokio::test]
async fn armed_reset_ignores_other_notifications() {
    let f = fixture();
    f.overlay_reset.arm();

    settle(f.layer.apply(PlayerEvent::VolumeChange)).await;
    settle(f.layer.apply(PlayerEvent::Play)).await;

    assert!(f.overlay_reset.is_armed());
}

#[tokio::test]
async fn late_overlay_load_does_not_overwrite() {
    let f = fixture();
    f.transport.hold("/icons/bigpause.svg");

    let on_pause = f.layer.apply(PlayerEvent::Pause);
    tokio::task::yield_now().await;
    let on_play = f.layer.apply(PlayerEvent::Play);
    settle(on_play).await;

    f.transport.release("/icons/bigpause.svg");
    settle(on_pause).await;

    assert_eq!(
        f.targets.overlay.content().get().markup(),
        Some("<svg>bigplay</svg>")
    );
}

#[tokio::test]
async fn volume_follows_state() {
    let f = fixture();

    f.player.set_volume(0.2);
    settle(f.layer.apply(PlayerEvent::VolumeChange)).await;
    assert_eq!(f.targets.volume.current_icon().as_deref(), Some("audio_low"));

    f.player.set_muted(true);
    settle(f.layer.apply(PlayerEvent::VolumeChange)).await;
    assert_eq!(
        f.targets.volume.content().get().markup(),
        Some("<svg>audio_mute</svg>")
    );
}

#[tokio::test]
async fn fullscreen_follows_state() {
    let f = fixture();

    f.player.request_fullscreen().await.unwrap();
    settle(f.layer.apply(PlayerEvent::FullscreenChange)).await;

    assert_eq!(
        f.targets.fullscreen.current_icon().as_deref(),
        Some("full_exit")
    );
}

#[tokio::test]
async fn pip_follows_page_wide_element() {
    let f = fixture();

    f.pip.set_active(Some(f.player.element()));
    settle(f.layer.apply(PlayerEvent::EnterPictureInPicture)).await;
    assert_eq!(
        f.targets.picture_in_picture.current_icon().as_deref(),
        Some("pip_exit")
    );

    f.pip.set_active(Some(crate::host::ElementId("other".to_string())));
    settle(f.layer.apply(PlayerEvent::LeavePictureInPicture)).await;
    assert_eq!(
        f.targets.picture_in_picture.current_icon().as_deref(),
        Some("pip")
    );
}

#[tokio::test]
async fn rate_change_updates_open_panel() {
    let f = fixture();
    assert!(f.layer.apply(PlayerEvent::RateChange).is_empty());

    let panel = f.settings.ensure(&SimSurface::new());
    f.player.set_playback_rate(1.75);
    f.layer.apply(PlayerEvent::RateChange);

    assert_eq!(panel.displayed_rate().get(), 1.75);
}

#[tokio::test]
async fn refresh_renders_every_state_driven_control() {
    let f = fixture();

    settle(f.layer.refresh()).await;

    assert_eq!(f.targets.play_pause.current_icon().as_deref(), Some("play"));
    assert_eq!(f.targets.volume.current_icon().as_deref(), Some("audio_full"));
    assert_eq!(f.targets.fullscreen.current_icon().as_deref(), Some("full"));
    assert_eq!(
        f.targets.picture_in_picture.current_icon().as_deref(),
        Some("pip")
    );
    assert_eq!(f.targets.overlay.current_icon(), None);
}
