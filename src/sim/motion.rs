//! Per-tick integration of the player and every scrolling entity
//!
//! Everything left of the player scrolls at the current speed. Entities are
//! culled once fully past the left edge; collected items are dropped one
//! tick after collection.

use super::catalog::{BIRD_EXTRA_SPEED, Bounds, PowerUpKind};
use super::state::GameState;

/// Coins inside this radius drift toward the player while the magnet runs
pub const MAGNET_RADIUS: f32 = 100.0;
/// Magnet pull per tick
pub const MAGNET_PULL: f32 = 3.0;

/// Advance all positions by one tick
pub fn update(state: &mut GameState) {
    let dx = state.speed.current.max(0.0);
    let ground_y = state.ground_y();

    state.player.integrate(state.settings.gravity, ground_y);

    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= dx;
    }
    for bird in &mut state.birds {
        bird.pos.x -= dx + BIRD_EXTRA_SPEED;
        bird.flap_phase = bird.flap_phase.wrapping_add(1);
    }
    for spike in &mut state.spikes {
        spike.pos.x -= dx;
    }
    for platform in &mut state.platforms {
        platform.pos.x -= dx;
        platform.advance();
    }
    for gap in &mut state.gaps {
        gap.pos.x -= dx;
    }
    for tree in &mut state.trees {
        tree.pos.x -= dx;
    }
    for trap in &mut state.fire_traps {
        trap.pos.x -= dx;
        trap.advance();
    }
    for power_up in &mut state.power_ups {
        power_up.pos.x -= dx;
    }

    let magnet = state.effects.is_active(PowerUpKind::Magnet);
    let player_center = state.player.bounds().center();
    for coin in &mut state.coins {
        coin.pos.x -= dx;
        coin.spin_phase = coin.spin_phase.wrapping_add(1);
        if magnet && !coin.collected {
            let to_player = player_center - coin.bounds().center();
            let dist = to_player.length();
            if dist < MAGNET_RADIUS && dist > 0.0 {
                coin.pos += to_player / dist * MAGNET_PULL.min(dist);
            }
        }
    }

    state.obstacles.retain(|e| !e.off_screen());
    state.birds.retain(|e| !e.off_screen());
    state.spikes.retain(|e| !e.off_screen());
    state.platforms.retain(|e| !e.off_screen());
    state.gaps.retain(|e| !e.off_screen());
    state.trees.retain(|e| !e.off_screen());
    state.fire_traps.retain(|e| !e.off_screen());
    state.coins.retain(|c| !c.collected && !c.off_screen());
    state.power_ups.retain(|p| !p.collected && !p.off_screen());

    state.danger.scroll(dx);
    state.stats.distance += dx;

    if let Some(monster) = state.monster.as_mut() {
        monster.anim_phase = monster.anim_phase.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::catalog::{COIN_SIZE, Coin, Obstacle};
    use glam::Vec2;

    fn state() -> GameState {
        let mut state = GameState::new(Settings::default());
        state.begin_run();
        state
    }

    #[test]
    fn test_entities_scroll_and_cull() {
        let mut state = state();
        state.obstacles.push(Obstacle {
            id: 1,
            pos: Vec2::new(-36.0, 300.0),
            size: Vec2::new(40.0, 50.0),
        });
        state.obstacles.push(Obstacle {
            id: 2,
            pos: Vec2::new(500.0, 300.0),
            size: Vec2::new(40.0, 50.0),
        });
        update(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, 495.0);
        assert_eq!(state.stats.distance, 5.0);
    }

    #[test]
    fn test_collected_coin_removed_next_tick() {
        let mut state = state();
        state.coins.push(Coin {
            id: 1,
            pos: Vec2::new(600.0, 200.0),
            size: COIN_SIZE,
            collected: true,
            spin_phase: 0,
        });
        update(&mut state);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_magnet_pulls_nearby_coins() {
        let mut state = state();
        state.effects.activate(PowerUpKind::Magnet);
        state.speed.current = 0.0;
        let center = state.player.bounds().center();
        // After the player's own integration the center is unchanged on the ground
        state.coins.push(Coin {
            id: 1,
            pos: center + Vec2::new(50.0, 0.0) - COIN_SIZE * 0.5,
            size: COIN_SIZE,
            collected: false,
            spin_phase: 0,
        });
        state.coins.push(Coin {
            id: 2,
            pos: center + Vec2::new(300.0, 0.0) - COIN_SIZE * 0.5,
            size: COIN_SIZE,
            collected: false,
            spin_phase: 0,
        });
        update(&mut state);
        let near = state.coins[0].bounds().center();
        let far = state.coins[1].bounds().center();
        assert!((near.x - (center.x + 47.0)).abs() < 1e-3);
        assert!((far.x - (center.x + 300.0)).abs() < 1e-3);
    }
}
