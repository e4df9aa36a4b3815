//! Collision detection and response
//!
//! Everything is an axis-aligned rectangle. Overlaps are tested with a
//! forgiveness margin: a pair only touches once it interpenetrates by more
//! than the margin on both axes.

use super::catalog::{Bounds, CollectibleKind, HazardKind, Rect};
use super::powerup;
use super::score;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use crate::consts::{COLLISION_MARGIN, PLATFORM_LANDING_BAND};

/// Margin-forgiving AABB overlap
#[inline]
pub fn overlaps(a: &Rect, b: &Rect, margin: f32) -> bool {
    a.left() + margin < b.right()
        && a.right() - margin > b.left()
        && a.top() + margin < b.bottom()
        && a.bottom() - margin > b.top()
}

/// Horizontal overlap only (same margin rule)
#[inline]
pub fn overlaps_x(a: &Rect, b: &Rect, margin: f32) -> bool {
    a.left() + margin < b.right() && a.right() - margin > b.left()
}

/// Record a damaging hit
fn register_hit(state: &mut GameState, kind: HazardKind, events: &mut Vec<GameEvent>) {
    state.hit_history.record(state.clock);
    state.stats.hits_taken += 1;
    state.speed.start_slowdown();
    score::refresh_speed(state);
    log::debug!(
        "hit by {:?} ({} in window)",
        kind,
        state.hit_history.len()
    );
    events.push(GameEvent::Hit { kind });
}

/// End the run
pub fn game_over(state: &mut GameState, cause: GameOverCause, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    log::info!("game over ({:?}) with score {}", cause, state.score);
    events.push(GameEvent::GameOver {
        final_score: state.score,
        cause,
    });
}

/// Land on a platform when falling into its top band
fn resolve_platforms(state: &mut GameState) {
    if state.player.vel_y <= 0.0 {
        return;
    }
    let player = state.player.bounds();
    let landing = state.platforms.iter().find(|p| {
        let top = p.pos.y;
        overlaps_x(&player, &p.bounds(), COLLISION_MARGIN)
            && player.bottom() >= top
            && player.bottom() <= top + PLATFORM_LANDING_BAND
    });
    if let Some(platform) = landing {
        let top = platform.pos.y;
        state.player.land_on(top);
    }
}

/// Gaps kill on contact with the ground line, shield or not
fn resolve_gaps(state: &GameState) -> bool {
    let player = state.player.bounds();
    let ground_y = state.ground_y();
    player.bottom() >= ground_y
        && state
            .gaps
            .iter()
            .any(|g| overlaps_x(&player, &g.bounds(), COLLISION_MARGIN))
}

/// Damaging hazards. Returns the kinds that scored a hit.
fn resolve_hazards(state: &mut GameState) -> Vec<HazardKind> {
    let player = state.player.bounds();
    let shielded = state.effects.invulnerable();
    let sliding = state.player.sliding;
    let mut hits = Vec::new();

    let touching = |r: Rect| overlaps(&player, &r, COLLISION_MARGIN);

    state.obstacles.retain(|o| {
        if touching(o.bounds()) && !shielded {
            hits.push(HazardKind::GroundObstacle);
            false
        } else {
            true
        }
    });

    state.birds.retain(|b| {
        if touching(b.bounds()) && !shielded {
            hits.push(HazardKind::Bird);
            false
        } else {
            true
        }
    });

    state.spikes.retain(|s| {
        if touching(s.bounds()) && !shielded {
            hits.push(HazardKind::Spike);
            false
        } else {
            true
        }
    });

    state.trees.retain(|t| {
        let passable = t.can_slide_under && sliding;
        if touching(t.bounds()) && !passable && !shielded {
            hits.push(HazardKind::FallenTree);
            false
        } else {
            true
        }
    });

    // Traps stay put and keep cycling
    for trap in &mut state.fire_traps {
        if trap.active && !trap.latched && touching(trap.bounds()) && !shielded {
            trap.latched = true;
            hits.push(HazardKind::FireTrap);
        }
    }

    hits
}

/// Coins and power-ups
fn resolve_collectibles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = state.player.bounds();

    let mut coins = 0u64;
    for coin in &mut state.coins {
        if !coin.collected && overlaps(&player, &coin.bounds(), COLLISION_MARGIN) {
            coin.collected = true;
            coins += 1;
            events.push(GameEvent::Collected {
                kind: CollectibleKind::Coin,
                at: coin.bounds().center(),
            });
        }
    }
    if coins > 0 {
        state.stats.coins += coins as u32;
        let value = score::coin_value(state) * coins;
        score::add_points(state, value, events);
    }

    let mut picked = Vec::new();
    for power_up in &mut state.power_ups {
        if !power_up.collected && overlaps(&player, &power_up.bounds(), COLLISION_MARGIN) {
            power_up.collected = true;
            picked.push(power_up.kind);
            events.push(GameEvent::Collected {
                kind: CollectibleKind::PowerUp(power_up.kind),
                at: power_up.bounds().center(),
            });
        }
    }
    for kind in picked {
        powerup::apply(state, kind, events);
    }
}

/// Resolve every player overlap for this tick
pub fn update(state: &mut GameState, events: &mut Vec<GameEvent>) {
    resolve_platforms(state);

    if resolve_gaps(state) {
        game_over(state, GameOverCause::Fell, events);
        return;
    }

    for kind in resolve_hazards(state) {
        register_hit(state, kind, events);
    }

    resolve_collectibles(state, events);
}
