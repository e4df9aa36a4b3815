//! Timed power-up effects
//!
//! Six independent countdowns. Speed and slow-motion both rewrite the scroll
//! speed, so starting one cancels the other.

use serde::{Deserialize, Serialize};

use super::catalog::PowerUpKind;
use super::score::refresh_speed;
use super::state::{GameEvent, GameState};

pub const SPEED_BOOST: f32 = 1.3;
pub const SLOW_MOTION_FACTOR: f32 = 0.6;

/// Remaining ticks per effect (0 = inactive)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUpState {
    timers: [u32; 6],
}

/// Read-only view of which effects are running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpFlags {
    pub shield: bool,
    pub magnet: bool,
    pub speed: bool,
    pub double_jump: bool,
    pub multiplier: bool,
    pub slow_motion: bool,
}

impl PowerUpState {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.timers[kind.index()] > 0
    }

    pub fn remaining(&self, kind: PowerUpKind) -> u32 {
        self.timers[kind.index()]
    }

    /// Shield makes the player immune to damaging hazards
    pub fn invulnerable(&self) -> bool {
        self.is_active(PowerUpKind::Shield)
    }

    /// (Re)start an effect's timer
    pub fn activate(&mut self, kind: PowerUpKind) {
        self.timers[kind.index()] = kind.duration();
        match kind {
            PowerUpKind::Speed => self.timers[PowerUpKind::SlowMotion.index()] = 0,
            PowerUpKind::SlowMotion => self.timers[PowerUpKind::Speed.index()] = 0,
            _ => {}
        }
    }

    /// Count every timer down; returns the effects that just ran out
    fn countdown(&mut self) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let timer = &mut self.timers[kind.index()];
            if *timer > 0 {
                *timer -= 1;
                if *timer == 0 {
                    expired.push(kind);
                }
            }
        }
        expired
    }

    /// Scroll multiplier of whichever speed effect is running
    pub fn speed_factor(&self) -> f32 {
        if self.is_active(PowerUpKind::Speed) {
            SPEED_BOOST
        } else if self.is_active(PowerUpKind::SlowMotion) {
            SLOW_MOTION_FACTOR
        } else {
            1.0
        }
    }

    pub fn flags(&self) -> PowerUpFlags {
        PowerUpFlags {
            shield: self.is_active(PowerUpKind::Shield),
            magnet: self.is_active(PowerUpKind::Magnet),
            speed: self.is_active(PowerUpKind::Speed),
            double_jump: self.is_active(PowerUpKind::DoubleJump),
            multiplier: self.is_active(PowerUpKind::Multiplier),
            slow_motion: self.is_active(PowerUpKind::SlowMotion),
        }
    }
}

/// Start an effect and apply its immediate speed change
pub fn apply(state: &mut GameState, kind: PowerUpKind, events: &mut Vec<GameEvent>) {
    state.effects.activate(kind);
    if matches!(kind, PowerUpKind::Speed | PowerUpKind::SlowMotion) {
        refresh_speed(state);
    }
    log::debug!("power-up {:?} active for {} ticks", kind, kind.duration());
    events.push(GameEvent::PowerUpActivated { kind });
}

/// Tick effect timers and undo expired speed changes
pub fn update(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for kind in state.effects.countdown() {
        if matches!(kind, PowerUpKind::Speed | PowerUpKind::SlowMotion) {
            refresh_speed(state);
        }
        log::debug!("power-up {:?} expired", kind);
        events.push(GameEvent::PowerUpExpired { kind });
    }
}
