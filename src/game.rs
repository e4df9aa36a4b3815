//! Host-facing facade
//!
//! Owns the state and the RNG stream. The host feeds intents and a frame
//! delta; it gets back a read-only snapshot and the events of that frame.

use serde::{Deserialize, Serialize};

use crate::settings::{ConfigError, Settings};
use crate::sim::catalog::*;
use crate::sim::player::Player;
use crate::sim::powerup::PowerUpFlags;
use crate::sim::rng::{PcgRng, RngSource};
use crate::sim::state::{GameEvent, GamePhase, GameState, Monster, RunStats};
use crate::sim::tick::{Intent, apply_intent, tick};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub tick: u64,
    pub score: u64,
    /// Spawner draws so far this run
    pub spawned: u32,
    pub base_speed: f32,
    pub scroll_speed: f32,
    /// Hits inside the rolling window
    pub recent_hits: usize,
    pub player: Player,
    pub monster: Option<Monster>,
    pub effects: PowerUpFlags,
    pub stats: RunStats,
    pub obstacles: Vec<Obstacle>,
    pub birds: Vec<Bird>,
    pub spikes: Vec<Spike>,
    pub platforms: Vec<MovingPlatform>,
    pub gaps: Vec<Gap>,
    pub trees: Vec<FallenTree>,
    pub fire_traps: Vec<FireTrap>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            score: state.score,
            spawned: state.spawner.spawned,
            base_speed: state.speed.base,
            scroll_speed: state.speed.current,
            recent_hits: state.hit_history.len(),
            player: state.player.clone(),
            monster: state.monster.clone(),
            effects: state.effects.flags(),
            stats: state.stats.clone(),
            obstacles: state.obstacles.clone(),
            birds: state.birds.clone(),
            spikes: state.spikes.clone(),
            platforms: state.platforms.clone(),
            gaps: state.gaps.clone(),
            trees: state.trees.clone(),
            fire_traps: state.fire_traps.clone(),
            coins: state.coins.iter().filter(|c| !c.collected).cloned().collect(),
            power_ups: state.power_ups.iter().filter(|p| !p.collected).cloned().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Result of one frame
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub snapshot: Snapshot,
    pub events: Vec<GameEvent>,
}

/// A game instance holding all state
pub struct Game<R: RngSource = PcgRng> {
    state: GameState,
    rng: R,
}

impl Game<PcgRng> {
    /// Validated settings, seeded PCG stream
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        let rng = PcgRng::new(seed);
        log::info!("pcg stream seeded with {}", rng.seed());
        Self::with_rng(settings, rng)
    }
}

impl<R: RngSource> Game<R> {
    /// Validated settings with a caller-provided random source
    pub fn with_rng(settings: Settings, rng: R) -> Result<Self, ConfigError> {
        settings.validate()?;
        log::info!(
            "world {}x{} (ground at y={})",
            settings.world_width,
            settings.world_height,
            settings.ground_y()
        );
        Ok(Self {
            state: GameState::new(settings),
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Apply a single intent outside a tick
    pub fn apply_intent(&mut self, intent: Intent) -> Vec<GameEvent> {
        let mut events = Vec::new();
        apply_intent(&mut self.state, intent, &mut events);
        events
    }

    /// Apply this frame's intents, then advance one tick
    pub fn tick(&mut self, intents: &[Intent], dt: f64) -> TickOutput {
        let mut events = Vec::new();
        for &intent in intents {
            apply_intent(&mut self.state, intent, &mut events);
        }
        events.extend(tick(&mut self.state, &mut self.rng, dt));
        TickOutput {
            snapshot: self.snapshot(),
            events,
        }
    }

    /// Back to the Ready phase with a fresh world; the RNG stream continues
    pub fn reset(&mut self) {
        let settings = self.state.settings.clone();
        self.state = GameState::new(settings);
        log::info!("game reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}
