//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host frame, fixed update order
//! - Injected RNG only
//! - No rendering, DOM or storage dependencies

pub mod catalog;
pub mod collision;
pub mod danger;
pub mod monster;
pub mod motion;
pub mod player;
pub mod powerup;
pub mod rng;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use catalog::{Bounds, CollectibleKind, DangerKind, HazardKind, PowerUpKind, Rect};
pub use collision::overlaps;
pub use danger::{AssistOutcome, DangerTracker, mark_dangerous};
pub use player::Player;
pub use powerup::{PowerUpFlags, PowerUpState};
pub use rng::{PcgRng, RngSource, SequenceRng};
pub use score::ScrollSpeed;
pub use spawner::{SpawnCategory, SpawnTable};
pub use state::{GameEvent, GameOverCause, GamePhase, GameState, HitHistory, Monster};
pub use tick::{Intent, apply_intent, tick};
