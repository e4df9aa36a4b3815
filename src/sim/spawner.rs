//! Entity spawner
//!
//! Counts down a cadence timer; on expiry draws one category from a fixed
//! cumulative table, generates it at the right edge, and re-arms the timer.
//! Hazardous kinds report to the danger tracker, the rest break its streak.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::*;
use super::danger::mark_dangerous;
use super::rng::RngSource;
use super::state::GameState;

/// Cadence bounds in ticks, upper exclusive
pub const CADENCE_TICKS: (u32, u32) = (30, 110);
/// Delay before the first spawn of a run
pub const FIRST_SPAWN_TICKS: u32 = 60;

/// Spawnable categories in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnCategory {
    GroundObstacle,
    Bird,
    SpikeCluster,
    MovingPlatform,
    Gap,
    FallenTree,
    FireTrap,
    /// Coin cluster or single power-up
    Collectible,
}

impl SpawnCategory {
    /// Hazardous categories keep the danger streak alive
    pub fn is_hazardous(self) -> bool {
        matches!(
            self,
            SpawnCategory::SpikeCluster
                | SpawnCategory::Gap
                | SpawnCategory::FallenTree
                | SpawnCategory::FireTrap
        )
    }
}

/// Weighted category table, selected by cumulative probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    entries: Vec<(SpawnCategory, f32)>,
}

impl SpawnTable {
    pub fn new(entries: Vec<(SpawnCategory, f32)>) -> Self {
        Self { entries }
    }

    /// Stock obstacle mix. The collectible band takes the remainder so the
    /// table covers [0, 1).
    pub fn standard() -> Self {
        Self::new(vec![
            (SpawnCategory::GroundObstacle, 0.30),
            (SpawnCategory::Bird, 0.15),
            (SpawnCategory::SpikeCluster, 0.15),
            (SpawnCategory::MovingPlatform, 0.08),
            (SpawnCategory::Gap, 0.07),
            (SpawnCategory::FallenTree, 0.07),
            (SpawnCategory::FireTrap, 0.05),
            (SpawnCategory::Collectible, 0.13),
        ])
    }

    pub fn entries(&self) -> &[(SpawnCategory, f32)] {
        &self.entries
    }

    pub fn total(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Category for a uniform draw in [0, 1).
    ///
    /// Draws past the accumulated total (float slack) land in the last band.
    pub fn select(&self, draw: f32) -> SpawnCategory {
        let mut cumulative = 0.0;
        for &(category, weight) in &self.entries {
            cumulative += weight;
            if draw < cumulative {
                return category;
            }
        }
        self.entries
            .last()
            .map(|&(category, _)| category)
            .unwrap_or(SpawnCategory::GroundObstacle)
    }
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Cadence counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerState {
    /// Ticks until the next spawn
    pub cooldown: u32,
    /// Total spawns this run
    pub spawned: u32,
}

impl Default for SpawnerState {
    fn default() -> Self {
        Self {
            cooldown: FIRST_SPAWN_TICKS,
            spawned: 0,
        }
    }
}

/// Advance the cadence; returns the category spawned this tick, if any
pub fn update<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<SpawnCategory> {
    state.spawner.cooldown = state.spawner.cooldown.saturating_sub(1);
    if state.spawner.cooldown > 0 {
        return None;
    }

    let category = state.settings.spawn_table.select(rng.next_f32());
    spawn(state, rng, category);
    state.spawner.spawned += 1;
    state.spawner.cooldown = rng.range_u32(CADENCE_TICKS.0, CADENCE_TICKS.1);
    log::debug!(
        "spawned {:?} (next in {} ticks, streak {})",
        category,
        state.spawner.cooldown,
        state.danger.streak
    );
    Some(category)
}

/// Generate one category at the spawn column
pub fn spawn<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R, category: SpawnCategory) {
    if !category.is_hazardous() {
        state.danger.reset_streak();
    }

    match category {
        SpawnCategory::GroundObstacle => spawn_obstacle(state, rng),
        SpawnCategory::Bird => spawn_bird(state, rng),
        SpawnCategory::SpikeCluster => spawn_spikes(state, rng),
        SpawnCategory::MovingPlatform => spawn_platform(state, rng),
        SpawnCategory::Gap => spawn_gap(state, rng),
        SpawnCategory::FallenTree => spawn_tree(state, rng),
        SpawnCategory::FireTrap => spawn_fire_trap(state, rng),
        SpawnCategory::Collectible => {
            if rng.chance(COIN_SHARE) {
                spawn_coins(state, rng);
            } else {
                spawn_power_up(state, rng);
            }
        }
    }
}

fn spawn_obstacle<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let width = rng.range(OBSTACLE_WIDTH.0, OBSTACLE_WIDTH.1);
    let height = rng.range(OBSTACLE_HEIGHT.0, OBSTACLE_HEIGHT.1);
    let id = state.next_entity_id();
    let pos = Vec2::new(state.spawn_x(), state.ground_y() - height);
    state.obstacles.push(Obstacle {
        id,
        pos,
        size: Vec2::new(width, height),
    });
}

fn spawn_bird<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let altitude = rng.range(BIRD_ALTITUDE.0, BIRD_ALTITUDE.1);
    let id = state.next_entity_id();
    let pos = Vec2::new(state.spawn_x(), state.ground_y() - altitude - BIRD_SIZE.y);
    state.birds.push(Bird {
        id,
        pos,
        size: BIRD_SIZE,
        flap_phase: 0,
    });
}

fn spawn_spikes<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let count = rng.range_u32(SPIKE_CLUSTER.0, SPIKE_CLUSTER.1 + 1);
    let cluster = state.next_entity_id();
    let start_x = state.spawn_x();
    let y = state.ground_y() - SPIKE_SIZE.y;

    for i in 0..count {
        let id = state.next_entity_id();
        state.spikes.push(Spike {
            id,
            pos: Vec2::new(start_x + i as f32 * SPIKE_SIZE.x, y),
            size: SPIKE_SIZE,
            cluster,
        });
    }

    if count >= SPIKE_DANGER_COUNT {
        let width = count as f32 * SPIKE_SIZE.x;
        mark_dangerous(state, rng, start_x + width / 2.0, width, DangerKind::Spikes);
    }
}

fn spawn_platform<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let altitude = rng.range(PLATFORM_ALTITUDE.0, PLATFORM_ALTITUDE.1);
    let top = state.ground_y() - altitude;
    let id = state.next_entity_id();
    let pos = Vec2::new(state.spawn_x(), top);
    state.platforms.push(MovingPlatform {
        id,
        pos,
        size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
        vel_y: PLATFORM_SPEED,
        min_y: top - PLATFORM_BOUNCE,
        max_y: top + PLATFORM_BOUNCE,
        strategic: false,
        danger_kind: None,
    });
}

fn spawn_gap<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let width = rng.range(GAP_WIDTH.0, GAP_WIDTH.1);
    let x = state.spawn_x();
    let id = state.next_entity_id();
    let pos = Vec2::new(x, state.ground_y());
    let size = Vec2::new(width, state.settings.ground_height);
    state.gaps.push(Gap { id, pos, size });
    mark_dangerous(state, rng, x + width / 2.0, width, DangerKind::Gap);
}

fn spawn_tree<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let tall = rng.chance(0.5);
    let height = if tall {
        rng.range(TALL_TREE_HEIGHT.0, TALL_TREE_HEIGHT.1)
    } else {
        rng.range(SHORT_TREE_HEIGHT.0, SHORT_TREE_HEIGHT.1)
    };
    let x = state.spawn_x();
    let id = state.next_entity_id();
    let tree = FallenTree {
        id,
        pos: Vec2::new(x, state.ground_y() - height),
        size: Vec2::new(TREE_WIDTH, height),
        can_slide_under: height > TREE_SLIDE_THRESHOLD,
    };
    let dangerous = tree.marks_danger();
    state.trees.push(tree);
    if dangerous {
        mark_dangerous(state, rng, x + TREE_WIDTH / 2.0, TREE_WIDTH, DangerKind::FallenTree);
    }
}

fn spawn_fire_trap<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    // Random phase so traps don't all fire in lockstep
    let active = rng.chance(0.5);
    let span = if active {
        FIRE_ACTIVE_TICKS
    } else {
        FIRE_INACTIVE_TICKS
    };
    let timer = rng.range_u32(1, span + 1);
    let x = state.spawn_x();
    let id = state.next_entity_id();
    state.fire_traps.push(FireTrap {
        id,
        pos: Vec2::new(x, state.ground_y() - FIRE_SIZE.y),
        size: FIRE_SIZE,
        active,
        timer,
        latched: false,
    });
    mark_dangerous(state, rng, x + FIRE_SIZE.x / 2.0, FIRE_SIZE.x, DangerKind::FireTrap);
}

fn spawn_coins<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let count = rng.range_u32(COIN_CLUSTER.0, COIN_CLUSTER.1 + 1);
    let pattern = CoinPattern::ALL[rng.pick_index(CoinPattern::ALL.len())];
    let origin = Vec2::new(state.spawn_x(), state.ground_y() - COIN_ALTITUDE);

    for i in 0..count {
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            pos: origin + pattern.offset(i, count),
            size: COIN_SIZE,
            collected: false,
            spin_phase: i,
        });
    }
}

fn spawn_power_up<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let kind = PowerUpKind::ALL[rng.pick_index(PowerUpKind::ALL.len())];
    let id = state.next_entity_id();
    let pos = Vec2::new(state.spawn_x(), state.ground_y() - POWERUP_ALTITUDE);
    state.power_ups.push(PowerUp {
        id,
        pos,
        size: POWERUP_SIZE,
        kind,
        collected: false,
    });
}
