//! Pursuer AI
//!
//! The number of hits in the rolling window drives everything: how close
//! the monster follows, how fast it moves, and whether it may end the run.

use super::collision::game_over;
use super::player::Player;
use super::state::{GameEvent, GameOverCause, GameState, Monster};
use crate::approach;

/// Monster stays this far from either screen edge
pub const EDGE_PADDING: f32 = 50.0;

pub const CHASE_DISTANCE: f32 = 250.0;
pub const CHASE_STEP_PER_HIT: f32 = 50.0;
pub const MIN_CHASE_DISTANCE: f32 = 40.0;
pub const DEAD_ZONE: f32 = 10.0;

pub const VERTICAL_CHASE_DISTANCE: f32 = 50.0;
pub const VERTICAL_STEP_PER_HIT: f32 = 10.0;
pub const MIN_VERTICAL_CHASE_DISTANCE: f32 = 20.0;
pub const VERTICAL_DEAD_ZONE: f32 = 5.0;
pub const VERTICAL_SPEED: f32 = 2.0;

/// Speed gain per recent hit
pub const HIT_SPEED_SCALE: f32 = 0.8;
/// Speed multiplier while the player is staggered
pub const SLOWDOWN_CHASE_FACTOR: f32 = 1.8;

/// Hits needed before proximity ends the run
pub const CATCH_MIN_HITS: usize = 2;
/// Hits at which the monster is drawn as lethal
pub const DEADLY_HITS: usize = 3;
pub const CATCH_VERTICAL_DISTANCE: f32 = 30.0;

pub fn chase_distance(hits: usize) -> f32 {
    (CHASE_DISTANCE - CHASE_STEP_PER_HIT * hits as f32).max(MIN_CHASE_DISTANCE)
}

pub fn vertical_chase_distance(hits: usize) -> f32 {
    (VERTICAL_CHASE_DISTANCE - VERTICAL_STEP_PER_HIT * hits as f32).max(MIN_VERTICAL_CHASE_DISTANCE)
}

/// Current pursuit speed
pub fn pursuit_speed(base_speed: f32, hits: usize, slowdown: bool) -> f32 {
    let slowdown_factor = if slowdown { SLOWDOWN_CHASE_FACTOR } else { 1.0 };
    base_speed * (1.0 + HIT_SPEED_SCALE * hits as f32) * slowdown_factor
}

/// Catch test: close on both axes and enough recent hits
pub fn can_catch(monster: &Monster, player: &Player, hits: usize) -> bool {
    hits >= CATCH_MIN_HITS
        && (player.pos.x - monster.pos.x).abs() < monster.catch_distance
        && (player.pos.y - monster.pos.y).abs() < CATCH_VERTICAL_DISTANCE
}

/// Recompute pursuit for this tick
pub fn update(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.hit_history.prune(state.clock);
    let hits = state.hit_history.len();
    let slowdown = state.speed.slowdown_active();
    let max_x = state.settings.world_width - EDGE_PADDING;
    let ground_y = state.ground_y();

    let Some(monster) = state.monster.as_mut() else {
        return;
    };
    let player = &state.player;

    monster.speed = pursuit_speed(monster.base_speed, hits, slowdown);
    monster.deadly = hits >= DEADLY_HITS;

    let ideal_x = player.pos.x - chase_distance(hits);
    if (ideal_x - monster.pos.x).abs() > DEAD_ZONE {
        monster.pos.x = approach(monster.pos.x, ideal_x, monster.speed);
    }
    monster.pos.x = monster
        .pos
        .x
        .min(max_x - monster.size.x)
        .max(EDGE_PADDING);

    let ideal_y = player.pos.y - vertical_chase_distance(hits);
    if (ideal_y - monster.pos.y).abs() > VERTICAL_DEAD_ZONE {
        monster.pos.y = approach(monster.pos.y, ideal_y, VERTICAL_SPEED);
    }
    monster.pos.y = monster.pos.y.min(ground_y - monster.size.y).max(0.0);

    if can_catch(monster, player, hits) {
        game_over(state, GameOverCause::Caught, events);
    }
}
