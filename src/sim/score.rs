//! Score accrual and progressive scroll speed
//!
//! One point every third tick while playing. Every 75 points the base speed
//! steps up by 0.5.

use serde::{Deserialize, Serialize};

use super::catalog::PowerUpKind;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Scroll speed bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollSpeed {
    /// Difficulty-driven speed, only ever grows during a run
    pub base: f32,
    /// Speed the world actually scrolls at this tick
    pub current: f32,
    /// Ticks left on the post-hit slowdown
    pub slowdown_ticks: u32,
}

impl ScrollSpeed {
    pub fn new(initial: f32) -> Self {
        Self {
            base: initial,
            current: initial,
            slowdown_ticks: 0,
        }
    }

    pub fn slowdown_active(&self) -> bool {
        self.slowdown_ticks > 0
    }

    /// Stagger the player after a hit
    pub fn start_slowdown(&mut self) {
        self.slowdown_ticks = HIT_SLOWDOWN_TICKS;
    }

    /// Base speed step from a score milestone
    pub fn raise_base(&mut self, step: f32) {
        self.base += step;
    }

    /// Derive `current` from base, the effect factor and the hit slowdown
    pub fn recompute(&mut self, effect_factor: f32) {
        let slowdown = if self.slowdown_active() {
            HIT_SLOWDOWN_FACTOR
        } else {
            1.0
        };
        self.current = (self.base * effect_factor * slowdown).max(0.0);
    }
}

/// Re-derive the scroll speed after any change to base, effects or slowdown
pub fn refresh_speed(state: &mut GameState) {
    let factor = state.effects.speed_factor();
    state.speed.recompute(factor);
}

/// Add points, stepping base speed for every milestone crossed
pub fn add_points(state: &mut GameState, points: u64, events: &mut Vec<GameEvent>) {
    if points == 0 {
        return;
    }
    let before = state.score / SPEED_MILESTONE_POINTS;
    state.score += points;
    let after = state.score / SPEED_MILESTONE_POINTS;

    if after > before {
        for _ in before..after {
            state.speed.raise_base(SPEED_MILESTONE_STEP);
        }
        refresh_speed(state);
        log::debug!(
            "score {} reached, base speed now {:.1}",
            state.score,
            state.speed.base
        );
    }
    events.push(GameEvent::ScoreChanged { score: state.score });
}

/// Value of one coin under the current effects
pub fn coin_value(state: &GameState) -> u64 {
    if state.effects.is_active(PowerUpKind::Multiplier) {
        COIN_VALUE * 2
    } else {
        COIN_VALUE
    }
}

/// Passive score and hit-slowdown recovery
pub fn update(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.speed.slowdown_ticks > 0 {
        state.speed.slowdown_ticks -= 1;
        if state.speed.slowdown_ticks == 0 {
            refresh_speed(state);
        }
    }

    if state.time_ticks % SCORE_TICK_INTERVAL == 0 {
        add_points(state, 1, events);
    }
}
