//! The runner
//!
//! Horizontal position is fixed; the world scrolls past. Only vertical motion,
//! jump state and the slide pose live here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{Bounds, Rect};
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
    pub jumping: bool,
    pub double_jump_used: bool,
    pub sliding: bool,
    /// Ticks until the slide reverts on its own
    pub slide_timer: u32,
    /// Opaque run animation counter
    pub run_phase: u32,
}

impl Player {
    /// Standing on the ground line at `x`
    pub fn new(x: f32, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(x, ground_y - PLAYER_HEIGHT),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            jumping: false,
            double_jump_used: false,
            sliding: false,
            slide_timer: 0,
            run_phase: 0,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Jump, or double jump while airborne.
    ///
    /// `unlimited_double` comes from the double-jump power-up and allows
    /// repeated air jumps.
    pub fn jump(&mut self, unlimited_double: bool) {
        if self.sliding {
            self.end_slide();
        }
        if !self.jumping {
            self.vel_y = JUMP_VELOCITY;
            self.jumping = true;
        } else if !self.double_jump_used || unlimited_double {
            self.vel_y = DOUBLE_JUMP_VELOCITY;
            self.double_jump_used = true;
        }
    }

    /// Duck to half height, keeping the feet planted
    pub fn start_slide(&mut self) {
        if self.jumping || self.sliding {
            return;
        }
        self.set_height(PLAYER_SLIDE_HEIGHT);
        self.sliding = true;
        self.slide_timer = SLIDE_TICKS;
    }

    pub fn end_slide(&mut self) {
        if !self.sliding {
            return;
        }
        self.set_height(PLAYER_HEIGHT);
        self.sliding = false;
        self.slide_timer = 0;
    }

    /// Resize around the feet
    fn set_height(&mut self, height: f32) {
        let feet = self.bottom();
        self.size.y = height;
        self.pos.y = feet - height;
    }

    /// Rest on a surface at `top`, clearing jump state
    pub fn land_on(&mut self, top: f32) {
        self.pos.y = top - self.size.y;
        self.vel_y = 0.0;
        self.jumping = false;
        self.double_jump_used = false;
    }

    /// One tick of gravity, ground clamp and slide timer
    pub fn integrate(&mut self, gravity: f32, ground_y: f32) {
        let accel = if self.vel_y > 0.0 {
            gravity * FALL_GRAVITY_SCALE
        } else {
            gravity
        };
        self.vel_y += accel;
        self.pos.y += self.vel_y;

        if self.pos.y >= ground_y - self.size.y {
            self.land_on(ground_y);
        }

        if self.sliding {
            self.slide_timer = self.slide_timer.saturating_sub(1);
            if self.slide_timer == 0 {
                self.end_slide();
            }
        }

        if !self.jumping {
            self.run_phase = self.run_phase.wrapping_add(1);
        }
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}
