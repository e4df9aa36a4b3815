//! Dash Runner headless entry point
//!
//! Plays one run with a simple autopilot and prints the final snapshot as
//! JSON. Usage: `dash-runner [seed] [max_ticks] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use dash_runner::{
    Game, Settings, Snapshot,
    consts::SIM_DT,
    sim::{Bounds, GameEvent, GamePhase, Intent, Rect},
};

/// How far ahead of the player's front edge the autopilot reacts
#[cfg(not(target_arch = "wasm32"))]
const LOOKAHEAD: f32 = 60.0;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        None => 1,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("invalid seed: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };
    let max_ticks = match args.next().map(|s| s.parse::<u64>()) {
        None => DEFAULT_MAX_TICKS,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("invalid tick count: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    let settings = match args.next() {
        None => Settings::default(),
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("failed to load {}: {}", path, e);
                return std::process::ExitCode::FAILURE;
            }
        },
    };

    let mut game = match Game::new(settings, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("bad settings: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };
    log::info!("Dash Runner (headless) seed={} max_ticks={}", seed, max_ticks);

    let mut snapshot = game.tick(&[Intent::Start], SIM_DT).snapshot;
    while snapshot.phase == GamePhase::Playing && snapshot.tick < max_ticks {
        let intents: Vec<Intent> = autopilot(&snapshot).into_iter().collect();
        let out = game.tick(&intents, SIM_DT);
        for event in &out.events {
            match event {
                GameEvent::ScoreChanged { .. } => {}
                GameEvent::GameOver { final_score, cause } => {
                    log::info!("game over ({:?}) with {} points", cause, final_score)
                }
                other => log::debug!("tick {}: {:?}", out.snapshot.tick, other),
            }
        }
        snapshot = out.snapshot;
    }

    log::info!(
        "finished after {} ticks: score {}, {} spawns, {} hits",
        snapshot.tick,
        snapshot.score,
        snapshot.spawned,
        snapshot.stats.hits_taken
    );

    match snapshot.to_json() {
        Ok(json) => {
            println!("{}", json);
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to serialize snapshot: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> Result<Settings, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Settings::from_json(&json)?)
}

/// Jump over ground threats, slide under overhead ones
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(snap: &Snapshot) -> Option<Intent> {
    let player = &snap.player;
    if player.jumping {
        return None;
    }
    let front = player.pos.x + player.size.x;
    let ahead = |r: Rect| r.left() > front - 5.0 && r.left() < front + LOOKAHEAD;

    let overhead = snap.birds.iter().any(|b| ahead(b.bounds()))
        || snap.trees.iter().any(|t| t.can_slide_under && ahead(t.bounds()));
    if overhead {
        return (!player.sliding).then_some(Intent::SlideStart);
    }

    let ground = snap.obstacles.iter().any(|o| ahead(o.bounds()))
        || snap.spikes.iter().any(|s| ahead(s.bounds()))
        || snap.gaps.iter().any(|g| ahead(g.bounds()))
        || snap.fire_traps.iter().any(|f| f.active && ahead(f.bounds()))
        || snap.trees.iter().any(|t| !t.can_slide_under && ahead(t.bounds()));
    ground.then_some(Intent::Jump)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}
