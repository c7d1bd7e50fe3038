//! Runs the control engine against a simulated player.
//!
//! Icons are served from a directory; a script of notifications and clicks
//! is replayed and every control's rendered content is printed after each
//! step.

use std::{error::Error, path::PathBuf, process, sync::Arc, time::Duration};

use clap::Parser;
use tracing::{Level, span, warn};

use controlbar::{
    bootstrap::{Engine, EngineOptions, HostBindings},
    config::EngineConfig,
    controls::{ControlButton, RenderedContent, toggles::PanelRow},
    host::PlayerEvent,
    sim::{FsTransport, SimPictureInPicture, SimSurface, SimulatedPlayer},
    tracing_config,
};

/// Time allowed for icon loads to settle between steps.
const SETTLE: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(name = "controlbar-sim", about = "Replay player events against the control engine")]
struct Args {
    /// Directory icons are served from
    #[arg(long, default_value = ".")]
    icons: PathBuf,

    /// Engine configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the icon base path
    #[arg(long)]
    base_path: Option<String>,

    /// Log swallowed failures
    #[arg(long)]
    log: bool,

    /// Simulate an environment without picture-in-picture
    #[arg(long)]
    no_pip: bool,

    /// Steps: `event:<name>`, `click:<control>`, `step-rate`, `volume:<0..1>`
    #[arg(value_delimiter = ',')]
    script: Vec<String>,
}

#[derive(Debug)]
enum Step {
    Event(PlayerEvent),
    Click(String),
    StepRate,
    Volume(f64),
}

fn parse_step(raw: &str) -> Result<Step, String> {
    match raw.split_once(':') {
        Some(("event", name)) => name.parse().map(Step::Event),
        Some(("click", control)) => Ok(Step::Click(control.to_string())),
        Some(("volume", level)) => level
            .parse()
            .map(Step::Volume)
            .map_err(|e| format!("invalid volume '{level}': {e}")),
        None if raw == "step-rate" => Ok(Step::StepRate),
        _ => Err(format!("unknown step '{raw}'")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(base_path) = &args.base_path {
        config = config.with_icon_base_path(base_path.clone());
    }
    if args.log {
        config = config.with_log(true);
    }

    tracing_config::init(config.log_level)?;
    let _span = span!(Level::INFO, "controlbar_sim").entered();

    let steps = args
        .script
        .iter()
        .map(|raw| parse_step(raw))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(2);
        });

    let player = Arc::new(SimulatedPlayer::new("sim-video"));
    let pip = Arc::new(SimPictureInPicture::new(!args.no_pip));
    pip.attach(&player);

    let host = HostBindings {
        player: player.clone(),
        surface: Arc::new(SimSurface::new()),
        pip,
        transport: Arc::new(FsTransport::new(args.icons.clone())),
    };
    let engine = Engine::install(host, EngineOptions::new(config))?;

    let mut diagnostics = engine.diagnostics().subscribe();

    tokio::time::sleep(SETTLE).await;
    print_controls(&engine, "install");

    for step in steps {
        match &step {
            Step::Event(event) => player.emit(*event),
            Step::Click(control) => {
                if !engine.click(control).await {
                    warn!(%control, "No such control");
                }
            }
            Step::StepRate => {
                if engine.activate_panel_row(PanelRow::PlaybackSpeed).is_none() {
                    warn!("Settings panel has not been opened");
                }
            }
            Step::Volume(level) => player.set_volume(*level),
        }

        tokio::time::sleep(SETTLE).await;
        while let Ok(diagnostic) = diagnostics.try_recv() {
            println!("  ! {diagnostic:?}");
        }
        print_controls(&engine, &format!("{step:?}"));
    }

    Ok(())
}

fn print_controls(engine: &Engine, heading: &str) {
    println!("{heading}");
    for button in engine.controls().iter().chain([engine.overlay()]) {
        println!("  {:<18} {}", button.id(), describe(button));
    }
    if let Some(panel) = engine.settings_panel() {
        println!(
            "  {:<18} visible={} rate={}",
            "settingsPanel",
            panel.is_visible(),
            panel.displayed_rate().get()
        );
    }
}

fn describe(button: &ControlButton) -> String {
    let icon = button.current_icon().unwrap_or_default();
    match button.content().get() {
        RenderedContent::Empty => format!("{icon} (loading)"),
        RenderedContent::Icon { .. } => format!("{icon} (icon)"),
        RenderedContent::Text(text) => format!("{icon} (text: {text})"),
    }
}
