//! Starmarket - fly between prediction markets rendered as planets.
//!
//! Headless demo: an autopilot flies a generated universe at a fixed tick
//! rate and reports what it found.
//!
//! Usage: `starmarket [CONFIG.ron | --dump-config]`

use std::ffi::OsStr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use game::{Autopilot, GameConfig, Session, SimEvent};
use input::{ControlAxis, KeyBindings};

fn describe_keys(bindings: &KeyBindings, axis: ControlAxis) -> String {
    bindings
        .keys(axis)
        .iter()
        .map(|key| format!("{:?}", key))
        .collect::<Vec<_>>()
        .join("/")
}

fn print_banner(bindings: &KeyBindings) {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                          STARMARKET                              ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                                       ║");
    for (label, axis) in [
        ("Turn left", ControlAxis::TurnLeft),
        ("Turn right", ControlAxis::TurnRight),
        ("Thrust", ControlAxis::Thrust),
        ("Brake", ControlAxis::Brake),
        ("Pitch up", ControlAxis::PitchUp),
        ("Pitch down", ControlAxis::PitchDown),
        ("Warp", ControlAxis::Warp),
    ] {
        println!("║    {:<11}- {:<50}║", label, describe_keys(bindings, axis));
    }
    let interact: Vec<String> = bindings.interact.iter().map(|k| format!("{:?}", k)).collect();
    println!("║    {:<11}- {:<50}║", "Interact", interact.join("/"));
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  Headless demo: the autopilot scans markets until time runs out. ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
}

fn log_event(session: &Session, event: &SimEvent) {
    match event {
        SimEvent::ShipMoved { .. } => {}
        SimEvent::WarpChanged { warping } => {
            log::info!("Warp drive {}", if *warping { "engaged" } else { "disengaged" });
        }
        SimEvent::NearestMarketChanged { current: Some(_), .. } => {
            if let Some(market) = session.nearest() {
                log::info!(
                    "TARGET LOCK: {} ({}) {}",
                    market.category,
                    market.id,
                    market.question
                );
            }
        }
        SimEvent::NearestMarketChanged { current: None, .. } => {
            log::debug!("Left market range");
        }
        SimEvent::Collision { obstacle } => log::trace!("Touching asteroid #{}", obstacle),
        SimEvent::ImpactAlert => log::warn!("IMPACT WARNING"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = std::env::args_os().nth(1);
    if arg.as_deref() == Some(OsStr::new("--dump-config")) {
        // Effective settings as a ready-to-edit starmarket.ron.
        print!("{}", GameConfig::load().to_ron_string()?);
        return Ok(());
    }

    print_banner(&KeyBindings::default());

    let config = match arg.map(PathBuf::from) {
        Some(path) => GameConfig::try_load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::load(),
    };

    log::info!("Starting Starmarket demo");

    let mut session = Session::new(&config);
    let mut pilot = Autopilot::new();

    let dt = config.demo.step_seconds();
    for _ in 0..config.demo.tick_count() {
        let events = pilot.drive(&mut session, dt);
        for event in events.iter().filter(|e| e.is_notable()) {
            log_event(&session, event);
        }
    }

    let player = session.progress().player();
    println!();
    println!(
        "Flight time: {:.1}s over {} ticks  (seed {})",
        session.elapsed(),
        session.frames(),
        session.seed()
    );
    println!(
        "Rank: {}  |  Points: {}  |  Markets analyzed: {}/{}",
        player.title,
        player.points,
        player.scanned.len(),
        session.markets().len()
    );
    for quest in session.progress().quests() {
        println!(
            "  [{}] {} ({}/{})",
            if quest.completed { "x" } else { " " },
            quest.title,
            quest.progress.min(quest.target),
            quest.target
        );
    }

    Ok(())
}
