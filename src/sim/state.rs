//! Game state and core simulation types
//!
//! One explicit record threaded through every component update.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::*;
use super::danger::DangerTracker;
use super::player::Player;
use super::powerup::PowerUpState;
use super::score::ScrollSpeed;
use super::spawner::SpawnerState;
use crate::consts::HIT_WINDOW_SECS;
use crate::settings::Settings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first Start intent
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// The pursuer reached the player
    Caught,
    /// The player ran into a gap
    Fell,
}

/// Discrete events for UI/audio hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Hit { kind: HazardKind },
    Collected { kind: CollectibleKind, at: Vec2 },
    PowerUpActivated { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    ScoreChanged { score: u64 },
    GameOver { final_score: u64, cause: GameOverCause },
}

/// The single pursuer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub pos: Vec2,
    pub size: Vec2,
    pub base_speed: f32,
    /// Derived each tick from hit history and slowdown
    pub speed: f32,
    pub catch_distance: f32,
    /// Render hint: the pursuer looks lethal
    pub deadly: bool,
    pub anim_phase: u32,
}

impl Monster {
    /// Resting on the ground at the left clamp bound
    pub fn new(base_speed: f32, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(super::monster::EDGE_PADDING, ground_y - MONSTER_SIZE.y),
            size: MONSTER_SIZE,
            base_speed,
            speed: base_speed,
            catch_distance: MONSTER_CATCH_DISTANCE,
            deadly: false,
            anim_phase: 0,
        }
    }
}

/// Rolling window of hit timestamps (simulated seconds)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitHistory {
    hits: VecDeque<f64>,
}

impl HitHistory {
    pub fn record(&mut self, at: f64) {
        self.hits.push_back(at);
    }

    /// Drop hits older than the window
    pub fn prune(&mut self, now: f64) {
        while let Some(&oldest) = self.hits.front() {
            if now - oldest > HIT_WINDOW_SECS {
                self.hits.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Dangerous-area marker left by a hazardous spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DangerArea {
    pub center_x: f32,
    pub width: f32,
    pub kind: DangerKind,
    /// Simulated seconds
    pub created_at: f64,
}

impl DangerArea {
    pub fn off_screen(&self) -> bool {
        self.center_x + self.width / 2.0 < 0.0
    }
}

/// Per-run counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Sum of scroll speeds, for parallax and distance readouts
    pub distance: f32,
    pub coins: u32,
    pub hits_taken: u32,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    /// Simulated seconds
    pub clock: f64,
    pub score: u64,
    pub speed: ScrollSpeed,
    pub player: Player,
    /// Exists only while a run is active
    pub monster: Option<Monster>,
    pub hit_history: HitHistory,
    pub effects: PowerUpState,
    pub danger: DangerTracker,
    pub spawner: SpawnerState,
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

    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state in the Ready phase
    pub fn new(settings: Settings) -> Self {
        let ground_y = settings.ground_y();
        Self {
            phase: GamePhase::Ready,
            time_ticks: 0,
            clock: 0.0,
            score: 0,
            speed: ScrollSpeed::new(settings.initial_scroll_speed),
            player: Player::new(settings.player_x, ground_y),
            monster: None,
            hit_history: HitHistory::default(),
            effects: PowerUpState::default(),
            danger: DangerTracker::default(),
            spawner: SpawnerState::default(),
            stats: RunStats::default(),
            obstacles: Vec::new(),
            birds: Vec::new(),
            spikes: Vec::new(),
            platforms: Vec::new(),
            gaps: Vec::new(),
            trees: Vec::new(),
            fire_traps: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn ground_y(&self) -> f32 {
        self.settings.ground_y()
    }

    /// Spawn column just past the right edge
    pub fn spawn_x(&self) -> f32 {
        self.settings.world_width + 20.0
    }

    /// Begin a run: the pursuer appears and the clock starts
    pub fn begin_run(&mut self) {
        let ground_y = self.ground_y();
        self.monster = Some(Monster::new(self.settings.monster_base_speed, ground_y));
        self.phase = GamePhase::Playing;
    }

    /// Total number of live transient entities
    pub fn entity_count(&self) -> usize {
        self.obstacles.len()
            + self.birds.len()
            + self.spikes.len()
            + self.platforms.len()
            + self.gaps.len()
            + self.trees.len()
            + self.fire_traps.len()
            + self.coins.len()
            + self.power_ups.len()
    }
}
