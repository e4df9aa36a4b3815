//! Dangerous-area tracking and the assist-platform heuristic
//!
//! Hazardous spawns register a marker here. Each marker rolls for a
//! strategic platform; two hazards in a row guarantee one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{
    DangerKind, MovingPlatform, PLATFORM_HEIGHT, STRATEGIC_PLATFORM_BOUNCE,
    STRATEGIC_PLATFORM_SPEED,
};
use super::rng::RngSource;
use super::state::{DangerArea, GameState};

/// Assist chance for gaps
pub const GAP_ASSIST_CHANCE: f32 = 0.8;
/// Assist chance for every other hazard
pub const HAZARD_ASSIST_CHANCE: f32 = 0.5;
/// Streak length at which assistance becomes certain
pub const GUARANTEED_STREAK: u32 = 2;
/// No new platform within this horizontal distance of an existing one
pub const PLATFORM_CLEARANCE: f32 = 150.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DangerTracker {
    pub areas: Vec<DangerArea>,
    /// Hazardous spawns since the last assist platform
    pub streak: u32,
}

impl DangerTracker {
    /// A non-hazardous spawn breaks the streak
    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    /// Scroll markers with the world and drop the ones past the left edge
    pub fn scroll(&mut self, dx: f32) {
        for area in &mut self.areas {
            area.center_x -= dx;
        }
        self.areas.retain(|a| !a.off_screen());
    }

    /// Probability of placing an assist platform for the current streak
    pub fn assist_chance(&self, kind: DangerKind) -> f32 {
        if self.streak >= GUARANTEED_STREAK {
            1.0
        } else if kind == DangerKind::Gap {
            GAP_ASSIST_CHANCE
        } else {
            HAZARD_ASSIST_CHANCE
        }
    }
}

/// Result of registering a dangerous area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistOutcome {
    /// Strategic platform created with this id
    Placed(u32),
    /// The roll failed
    Declined,
    /// Another platform is too close
    Crowded,
}

/// Platform geometry for a hazard: (center x, top y, width)
fn placement(kind: DangerKind, center_x: f32, width: f32, ground_y: f32) -> (f32, f32, f32) {
    match kind {
        // Wide and high, starting slightly before the hole
        DangerKind::Gap => (center_x - width * 0.15, ground_y - 120.0, (width + 60.0).max(140.0)),
        DangerKind::Spikes => (center_x, ground_y - 90.0, (width + 30.0).max(100.0)),
        // Ahead of the trunk so the jump arc carries over it
        DangerKind::FallenTree => (center_x - 50.0, ground_y - 110.0, 100.0),
        DangerKind::FireTrap => (center_x + 30.0, ground_y - 100.0, 90.0),
    }
}

/// Register a hazard and maybe place a strategic platform over it
pub fn mark_dangerous<R: RngSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    center_x: f32,
    width: f32,
    kind: DangerKind,
) -> AssistOutcome {
    state.danger.areas.push(DangerArea {
        center_x,
        width,
        kind,
        created_at: state.clock,
    });
    state.danger.streak += 1;

    let chance = state.danger.assist_chance(kind);
    if !rng.chance(chance) {
        return AssistOutcome::Declined;
    }

    let (platform_center, top, platform_width) =
        placement(kind, center_x, width, state.ground_y());

    let crowded = state.platforms.iter().any(|p| {
        let other_center = p.pos.x + p.size.x / 2.0;
        (other_center - platform_center).abs() < PLATFORM_CLEARANCE
    });
    if crowded {
        log::debug!(
            "assist platform for {:?} at x={:.0} skipped (crowded), streak {}",
            kind,
            platform_center,
            state.danger.streak
        );
        return AssistOutcome::Crowded;
    }

    let id = state.next_entity_id();
    state.platforms.push(MovingPlatform {
        id,
        pos: Vec2::new(platform_center - platform_width / 2.0, top),
        size: Vec2::new(platform_width, PLATFORM_HEIGHT),
        vel_y: STRATEGIC_PLATFORM_SPEED,
        min_y: top - STRATEGIC_PLATFORM_BOUNCE,
        max_y: top + STRATEGIC_PLATFORM_BOUNCE,
        strategic: true,
        danger_kind: Some(kind),
    });
    log::debug!(
        "assist platform {} for {:?} at x={:.0} (streak {} -> 0)",
        id,
        kind,
        platform_center,
        state.danger.streak
    );
    state.danger.streak = 0;

    AssistOutcome::Placed(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::rng::SequenceRng;

    fn state() -> GameState {
        let mut state = GameState::new(Settings::default());
        state.begin_run();
        state
    }

    #[test]
    fn test_gap_uses_higher_chance() {
        let mut state = state();
        // 0.7 passes the 0.8 gap roll but would fail 0.5
        let mut rng = SequenceRng::constant(0.7);
        let outcome = mark_dangerous(&mut state, &mut rng, 900.0, 100.0, DangerKind::Gap);
        assert!(matches!(outcome, AssistOutcome::Placed(_)));

        let mut state = self::state();
        let outcome = mark_dangerous(&mut state, &mut rng, 900.0, 60.0, DangerKind::Spikes);
        assert_eq!(outcome, AssistOutcome::Declined);
        assert_eq!(state.danger.streak, 1);
    }

    #[test]
    fn test_second_hazard_is_guaranteed() {
        let mut state = state();
        let mut rng = SequenceRng::constant(0.99);
        let first = mark_dangerous(&mut state, &mut rng, 900.0, 80.0, DangerKind::FireTrap);
        assert_eq!(first, AssistOutcome::Declined);

        let second = mark_dangerous(&mut state, &mut rng, 1200.0, 80.0, DangerKind::FireTrap);
        assert!(matches!(second, AssistOutcome::Placed(_)));
        assert_eq!(state.danger.streak, 0);

        let platform = state.platforms.last().unwrap();
        assert!(platform.strategic);
        assert_eq!(platform.danger_kind, Some(DangerKind::FireTrap));
    }

    #[test]
    fn test_crowded_placement_keeps_streak() {
        let mut state = state();
        let mut rng = SequenceRng::constant(0.0);
        let first = mark_dangerous(&mut state, &mut rng, 900.0, 80.0, DangerKind::Spikes);
        assert!(matches!(first, AssistOutcome::Placed(_)));

        // Right next to the platform just placed
        let second = mark_dangerous(&mut state, &mut rng, 950.0, 80.0, DangerKind::Spikes);
        assert_eq!(second, AssistOutcome::Crowded);
        assert_eq!(state.platforms.len(), 1);
        assert_eq!(state.danger.streak, 1);
    }

    #[test]
    fn test_guaranteed_after_two_unrelieved_hazards() {
        let mut state = state();
        let mut rng = SequenceRng::constant(0.99);
        mark_dangerous(&mut state, &mut rng, 900.0, 80.0, DangerKind::FallenTree);
        assert_eq!(state.danger.streak, 1);

        // Block the second placement with a nearby platform
        let blocker = state.next_entity_id();
        state.platforms.push(MovingPlatform {
            id: blocker,
            pos: Vec2::new(1100.0, 200.0),
            size: Vec2::new(100.0, PLATFORM_HEIGHT),
            vel_y: 1.0,
            min_y: 170.0,
            max_y: 230.0,
            strategic: false,
            danger_kind: None,
        });
        let second = mark_dangerous(&mut state, &mut rng, 1150.0, 80.0, DangerKind::FallenTree);
        assert_eq!(second, AssistOutcome::Crowded);
        assert_eq!(state.danger.streak, 2);

        // Third hazard, away from the blocker, rolls 0.99 against certainty
        let third = mark_dangerous(&mut state, &mut rng, 1600.0, 80.0, DangerKind::Spikes);
        assert!(matches!(third, AssistOutcome::Placed(_)));
        assert_eq!(state.danger.streak, 0);
    }

    #[test]
    fn test_areas_pruned_after_scrolling_off() {
        let mut tracker = DangerTracker::default();
        tracker.areas.push(DangerArea {
            center_x: 40.0,
            width: 60.0,
            kind: DangerKind::Gap,
            created_at: 0.0,
        });
        tracker.scroll(60.0);
        assert_eq!(tracker.areas.len(), 1);
        tracker.scroll(20.1);
        assert!(tracker.areas.is_empty());
    }
}
