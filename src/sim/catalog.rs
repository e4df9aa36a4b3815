//! Entity catalog
//!
//! Data definitions for every spawnable kind, plus the geometry and behaviour
//! parameters the spawner and motion system read.

use glam::Vec2;
use serde::{Deserialize, Serialize};

// === Ground obstacle ===
pub const OBSTACLE_WIDTH: (f32, f32) = (30.0, 50.0);
pub const OBSTACLE_HEIGHT: (f32, f32) = (40.0, 70.0);

// === Bird ===
pub const BIRD_SIZE: Vec2 = Vec2::new(40.0, 30.0);
/// Altitude of the bird's bottom edge above the ground line
pub const BIRD_ALTITUDE: (f32, f32) = (45.0, 140.0);
/// Birds fly toward the player on top of the scroll speed
pub const BIRD_EXTRA_SPEED: f32 = 1.5;

// === Spikes ===
pub const SPIKE_SIZE: Vec2 = Vec2::new(20.0, 25.0);
/// Cluster length, inclusive
pub const SPIKE_CLUSTER: (u32, u32) = (3, 6);
/// Clusters at least this long are registered as dangerous
pub const SPIKE_DANGER_COUNT: u32 = 4;

// === Moving platform ===
pub const PLATFORM_WIDTH: f32 = 100.0;
pub const PLATFORM_HEIGHT: f32 = 15.0;
/// Height of the platform top above the ground line
pub const PLATFORM_ALTITUDE: (f32, f32) = (80.0, 160.0);
pub const PLATFORM_BOUNCE: f32 = 30.0;
pub const PLATFORM_SPEED: f32 = 1.0;
pub const STRATEGIC_PLATFORM_BOUNCE: f32 = 15.0;
pub const STRATEGIC_PLATFORM_SPEED: f32 = 0.5;

// === Gap ===
pub const GAP_WIDTH: (f32, f32) = (80.0, 140.0);

// === Fallen tree ===
pub const TREE_WIDTH: f32 = 80.0;
pub const SHORT_TREE_HEIGHT: (f32, f32) = (35.0, 50.0);
pub const TALL_TREE_HEIGHT: (f32, f32) = (55.0, 70.0);
/// Trees taller than this leave room to slide under the trunk
pub const TREE_SLIDE_THRESHOLD: f32 = 50.0;

// === Fire trap ===
pub const FIRE_SIZE: Vec2 = Vec2::new(40.0, 50.0);
pub const FIRE_ACTIVE_TICKS: u32 = 60;
pub const FIRE_INACTIVE_TICKS: u32 = 90;

// === Collectibles ===
pub const COIN_SIZE: Vec2 = Vec2::new(20.0, 20.0);
/// Cluster length, inclusive
pub const COIN_CLUSTER: (u32, u32) = (3, 7);
pub const COIN_SPACING: f32 = 30.0;
pub const COIN_ALTITUDE: f32 = 80.0;
pub const COIN_ARC_HEIGHT: f32 = 60.0;
pub const POWERUP_SIZE: Vec2 = Vec2::new(30.0, 30.0);
pub const POWERUP_ALTITUDE: f32 = 100.0;
/// Share of the coin/power-up band that produces coins
pub const COIN_SHARE: f32 = 0.8;

// === Monster ===
pub const MONSTER_SIZE: Vec2 = Vec2::new(70.0, 70.0);
pub const MONSTER_CATCH_DISTANCE: f32 = 100.0;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Anything with a collision rectangle
pub trait Bounds {
    fn bounds(&self) -> Rect;

    /// Fully scrolled past the left edge
    fn off_screen(&self) -> bool {
        self.bounds().right() < 0.0
    }
}

/// Damaging hazards (used in hit events)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    GroundObstacle,
    Bird,
    Spike,
    FallenTree,
    FireTrap,
}

/// Hazards that leave a dangerous-area marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DangerKind {
    Spikes,
    Gap,
    FallenTree,
    FireTrap,
}

/// Timed power-up effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Magnet,
    Speed,
    DoubleJump,
    Multiplier,
    SlowMotion,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Shield,
        PowerUpKind::Magnet,
        PowerUpKind::Speed,
        PowerUpKind::DoubleJump,
        PowerUpKind::Multiplier,
        PowerUpKind::SlowMotion,
    ];

    /// Effect duration in ticks
    pub fn duration(self) -> u32 {
        match self {
            PowerUpKind::Shield => 180,
            PowerUpKind::Magnet => 360,
            PowerUpKind::Speed => 180,
            PowerUpKind::DoubleJump => 240,
            PowerUpKind::Multiplier => 300,
            PowerUpKind::SlowMotion => 180,
        }
    }

    /// Slot in per-kind arrays
    pub fn index(self) -> usize {
        match self {
            PowerUpKind::Shield => 0,
            PowerUpKind::Magnet => 1,
            PowerUpKind::Speed => 2,
            PowerUpKind::DoubleJump => 3,
            PowerUpKind::Multiplier => 4,
            PowerUpKind::SlowMotion => 5,
        }
    }
}

/// What a collect event picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    PowerUp(PowerUpKind),
}

/// Coin cluster layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinPattern {
    Horizontal,
    Vertical,
    Arc,
}

impl CoinPattern {
    pub const ALL: [CoinPattern; 3] = [CoinPattern::Horizontal, CoinPattern::Vertical, CoinPattern::Arc];

    /// Offset of coin `i` of `count` from the cluster origin
    pub fn offset(self, i: u32, count: u32) -> Vec2 {
        let i_f = i as f32;
        match self {
            CoinPattern::Horizontal => Vec2::new(i_f * COIN_SPACING, 0.0),
            CoinPattern::Vertical => Vec2::new(0.0, -i_f * COIN_SPACING),
            CoinPattern::Arc => {
                let t = if count > 1 { i_f / (count - 1) as f32 } else { 0.5 };
                Vec2::new(
                    i_f * COIN_SPACING,
                    -(t * std::f32::consts::PI).sin() * COIN_ARC_HEIGHT,
                )
            }
        }
    }
}

/// Static ground block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Low-flying bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Opaque animation counter
    pub flap_phase: u32,
}

/// One spike of a contiguous cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spike {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Id shared by every spike of the same cluster
    pub cluster: u32,
}

/// Vertically bouncing platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    /// Bounce bounds for the platform top
    pub min_y: f32,
    pub max_y: f32,
    /// Spawned by the danger-assist heuristic
    pub strategic: bool,
    pub danger_kind: Option<DangerKind>,
}

impl MovingPlatform {
    /// Bounce between `min_y` and `max_y`
    pub fn advance(&mut self) {
        self.pos.y += self.vel_y;
        if self.pos.y <= self.min_y {
            self.pos.y = self.min_y;
            self.vel_y = self.vel_y.abs();
        } else if self.pos.y >= self.max_y {
            self.pos.y = self.max_y;
            self.vel_y = -self.vel_y.abs();
        }
    }
}

/// Hole in the ground; overlapping it at ground level is fatal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Trunk lying across the track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallenTree {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub can_slide_under: bool,
}

impl FallenTree {
    /// Literal danger predicate of the trunk height.
    ///
    /// Generated heights never fall in (50, 55), so every tree qualifies.
    pub fn marks_danger(&self) -> bool {
        self.size.y >= TALL_TREE_HEIGHT.0 || self.size.y <= SHORT_TREE_HEIGHT.1
    }
}

/// Flame vent with an active/inactive duty cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireTrap {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    /// Ticks left in the current phase
    pub timer: u32,
    /// Already scored a hit during this active phase
    pub latched: bool,
}

impl FireTrap {
    /// Count down the phase timer, flipping between burning and idle
    pub fn advance(&mut self) {
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.active = !self.active;
            self.timer = if self.active {
                FIRE_ACTIVE_TICKS
            } else {
                self.latched = false;
                FIRE_INACTIVE_TICKS
            };
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    pub spin_phase: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
}

impl Bounds for Obstacle {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounds for Bird {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounds for Spike {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounds for MovingPlatform {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounds for Gap {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounds for FallenTree {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounds for FireTrap {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounds for Coin {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Bounds for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_bounces_inside_bounds() {
        let mut platform = MovingPlatform {
            id: 1,
            pos: Vec2::new(0.0, 100.0),
            size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
            vel_y: 4.0,
            min_y: 90.0,
            max_y: 110.0,
            strategic: false,
            danger_kind: None,
        };
        for _ in 0..50 {
            platform.advance();
            assert!(platform.pos.y >= 90.0 && platform.pos.y <= 110.0);
        }
    }

    #[test]
    fn test_fire_trap_cycles_and_unlatches() {
        let mut trap = FireTrap {
            id: 1,
            pos: Vec2::ZERO,
            size: FIRE_SIZE,
            active: true,
            timer: 1,
            latched: true,
        };
        trap.advance();
        assert!(!trap.active);
        assert!(!trap.latched);
        assert_eq!(trap.timer, FIRE_INACTIVE_TICKS);

        for _ in 0..FIRE_INACTIVE_TICKS {
            trap.advance();
        }
        assert!(trap.active);
        assert_eq!(trap.timer, FIRE_ACTIVE_TICKS);
    }

    #[test]
    fn test_tree_danger_predicate_covers_generated_heights() {
        for height in [35.0, 42.0, 50.0, 55.0, 69.9] {
            let tree = FallenTree {
                id: 1,
                pos: Vec2::ZERO,
                size: Vec2::new(TREE_WIDTH, height),
                can_slide_under: height > TREE_SLIDE_THRESHOLD,
            };
            assert!(tree.marks_danger());
        }
    }

    #[test]
    fn test_arc_pattern_peaks_in_middle() {
        let first = CoinPattern::Arc.offset(0, 5);
        let mid = CoinPattern::Arc.offset(2, 5);
        assert!(first.y.abs() < 0.001);
        assert!((mid.y + COIN_ARC_HEIGHT).abs() < 0.001);
    }
}
