//! Dash Runner - simulation core for a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, pursuer AI)
//! - `game`: Host-facing facade (intents in, snapshot + events out)
//! - `settings`: World configuration and validation
//!
//! Rendering, input devices and high-score storage live in the host.

pub mod game;
pub mod settings;
pub mod sim;

pub use game::{Game, Snapshot, TickOutput};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per display refresh)
    pub const TICK_RATE: f64 = 60.0;
    /// Nominal frame delta
    pub const SIM_DT: f64 = 1.0 / TICK_RATE;
    /// Largest frame delta accepted from the host (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SLIDE_HEIGHT: f32 = 30.0;
    pub const JUMP_VELOCITY: f32 = -12.0;
    pub const DOUBLE_JUMP_VELOCITY: f32 = -9.0;
    /// Extra gravity while falling
    pub const FALL_GRAVITY_SCALE: f32 = 1.5;
    pub const SLIDE_TICKS: u32 = 20;

    /// Forgiveness margin for AABB tests
    pub const COLLISION_MARGIN: f32 = 5.0;
    /// Depth of the band below a platform top that counts as a landing
    pub const PLATFORM_LANDING_BAND: f32 = 15.0;

    /// Score/speed progression
    pub const SCORE_TICK_INTERVAL: u64 = 3;
    pub const SPEED_MILESTONE_POINTS: u64 = 75;
    pub const SPEED_MILESTONE_STEP: f32 = 0.5;
    pub const COIN_VALUE: u64 = 10;

    /// Hit slowdown
    pub const HIT_SLOWDOWN_TICKS: u32 = 60;
    pub const HIT_SLOWDOWN_FACTOR: f32 = 0.5;
    /// Rolling window for hit history (simulated seconds)
    pub const HIT_WINDOW_SECS: f64 = 10.0;
}

/// Move `current` toward `target` by at most `step`, never overshooting
#[inline]
pub fn approach(current: f32, target: f32, step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= step {
        target
    } else {
        current + step * delta.signum()
    }
}
