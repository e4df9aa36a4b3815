//! Per-frame simulation tick
//!
//! Fixed order: spawn, motion, collision, power-ups, pursuer, score.
//! Intents are applied before the tick they arrive with.

use serde::{Deserialize, Serialize};

use super::catalog::PowerUpKind;
use super::rng::RngSource;
use super::state::{GameEvent, GamePhase, GameState};
use super::{collision, monster, motion, powerup, score, spawner};
use crate::consts::MAX_FRAME_DT;

/// Input intents from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Start,
    Restart,
    Jump,
    SlideStart,
    SlideStop,
}

/// Apply one intent; intents invalid for the current phase are ignored
pub fn apply_intent(state: &mut GameState, intent: Intent, events: &mut Vec<GameEvent>) {
    match (intent, state.phase) {
        (Intent::Start, GamePhase::Ready) => {
            state.begin_run();
            log::info!("run started");
            events.push(GameEvent::Started);
        }
        (Intent::Restart, GamePhase::GameOver) => {
            let settings = state.settings.clone();
            *state = GameState::new(settings);
            state.begin_run();
            log::info!("run restarted");
            events.push(GameEvent::Started);
        }
        (Intent::Jump, GamePhase::Playing) => {
            let unlimited = state.effects.is_active(PowerUpKind::DoubleJump);
            state.player.jump(unlimited);
        }
        (Intent::SlideStart, GamePhase::Playing) => state.player.start_slide(),
        (Intent::SlideStop, GamePhase::Playing) => state.player.end_slide(),
        _ => {}
    }
}

/// Advance the game state by one frame.
///
/// `dt` only drives the simulated clock (hit window, danger timestamps);
/// movement rates are per tick.
pub fn tick<R: RngSource + ?Sized>(state: &mut GameState, rng: &mut R, dt: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.clock += dt.clamp(0.0, MAX_FRAME_DT);

    spawner::update(state, rng);
    motion::update(state);

    collision::update(state, &mut events);
    if state.phase != GamePhase::Playing {
        return events;
    }

    powerup::update(state, &mut events);

    monster::update(state, &mut events);
    if state.phase != GamePhase::Playing {
        return events;
    }

    score::update(state, &mut events);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{HIT_SLOWDOWN_TICKS, SIM_DT};
    use crate::sim::state::GameOverCause;
    use crate::settings::Settings;
    use crate::sim::catalog::{Bounds, Obstacle, POWERUP_SIZE, PowerUp};
    use crate::sim::rng::{PcgRng, SequenceRng};
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(Settings::default());
        let mut events = Vec::new();
        apply_intent(&mut state, Intent::Start, &mut events);
        state
    }

    /// Keep the spawner quiet so a test controls every entity
    fn quiet(state: &mut GameState) {
        state.spawner.cooldown = u32::MAX;
    }

    #[test]
    fn test_start_and_invalid_intents() {
        let mut state = GameState::new(Settings::default());
        let mut events = Vec::new();

        // Jump before start is a no-op
        apply_intent(&mut state, Intent::Jump, &mut events);
        assert!(!state.player.jumping);
        apply_intent(&mut state, Intent::Restart, &mut events);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(events.is_empty());

        apply_intent(&mut state, Intent::Start, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.monster.is_some());
        assert_eq!(events, vec![GameEvent::Started]);

        // Second start is ignored
        apply_intent(&mut state, Intent::Start, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_ticks_ignored_outside_playing() {
        let mut state = GameState::new(Settings::default());
        let mut rng = PcgRng::new(1);
        let events = tick(&mut state, &mut rng, SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_restart_rebuilds_state() {
        let mut state = playing();
        let mut events = Vec::new();
        state.score = 99;
        state.phase = GamePhase::GameOver;
        apply_intent(&mut state, Intent::Restart, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert!(state.monster.is_some());
    }

    #[test]
    fn test_double_jump_power_up_allows_repeats() {
        let mut state = playing();
        let mut events = Vec::new();
        state.effects.activate(PowerUpKind::DoubleJump);
        apply_intent(&mut state, Intent::Jump, &mut events);
        apply_intent(&mut state, Intent::Jump, &mut events);
        state.player.vel_y = 3.0;
        apply_intent(&mut state, Intent::Jump, &mut events);
        assert_eq!(state.player.vel_y, crate::consts::DOUBLE_JUMP_VELOCITY);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing();
        let mut state2 = playing();
        let mut rng1 = PcgRng::new(99999);
        let mut rng2 = PcgRng::new(99999);

        for i in 0..600 {
            if i % 40 == 0 {
                let mut events = Vec::new();
                apply_intent(&mut state1, Intent::Jump, &mut events);
                apply_intent(&mut state2, Intent::Jump, &mut events);
            }
            let e1 = tick(&mut state1, &mut rng1, SIM_DT);
            let e2 = tick(&mut state2, &mut rng2, SIM_DT);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.entity_count(), state2.entity_count());
    }

    #[test]
    fn test_score_accrues_every_third_tick() {
        let mut state = playing();
        quiet(&mut state);
        let mut rng = SequenceRng::constant(0.5);
        for _ in 0..30 {
            tick(&mut state, &mut rng, SIM_DT);
        }
        assert_eq!(state.score, 10);
    }

    fn obstacle_on_player(state: &mut GameState) {
        let id = state.next_entity_id();
        let pos = state.player.pos;
        state.obstacles.push(Obstacle {
            id,
            pos: pos + Vec2::new(5.0, 0.0),
            size: Vec2::new(40.0, 60.0),
        });
    }

    #[test]
    fn test_two_recent_hits_let_monster_catch() {
        let mut state = playing();
        quiet(&mut state);
        let mut rng = SequenceRng::constant(0.5);
        state.hit_history.record(state.clock);
        state.hit_history.record(state.clock);

        let mut caught = None;
        for _ in 0..120 {
            let events = tick(&mut state, &mut rng, SIM_DT);
            if let Some(event) = events
                .into_iter()
                .find(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                caught = Some(event);
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(matches!(
            caught,
            Some(GameEvent::GameOver {
                cause: GameOverCause::Caught,
                ..
            })
        ));
        assert!(!state.player.jumping);
    }

    #[test]
    fn test_one_recent_hit_is_survivable() {
        let mut state = playing();
        quiet(&mut state);
        let mut rng = SequenceRng::constant(0.5);
        state.hit_history.record(state.clock);
        for _ in 0..120 {
            tick(&mut state, &mut rng, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_three_hits_escalate_monster_speed() {
        // Player far enough ahead that the pursuer never closes to catch range
        let settings = Settings {
            player_x: 250.0,
            ..Default::default()
        };
        let mut state = GameState::new(settings);
        let mut events = Vec::new();
        apply_intent(&mut state, Intent::Start, &mut events);
        quiet(&mut state);
        let mut rng = SequenceRng::constant(0.5);

        for _ in 0..3 {
            obstacle_on_player(&mut state);
            let events = tick(&mut state, &mut rng, SIM_DT);
            assert!(events.iter().any(|e| matches!(e, GameEvent::Hit { .. })));
        }
        assert_eq!(state.hit_history.len(), 3);

        // Let the post-hit slowdown run out, well inside the 10 s window
        for _ in 0..HIT_SLOWDOWN_TICKS {
            tick(&mut state, &mut rng, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.speed.slowdown_active());

        let monster = state.monster.as_ref().unwrap();
        assert!(monster.deadly);
        assert!((monster.speed - 10.2).abs() < 1e-4);
    }

    #[test]
    fn test_hit_slowdown_keeps_speed_boost() {
        let mut state = playing();
        quiet(&mut state);
        let mut rng = SequenceRng::constant(0.5);
        let mut events = Vec::new();
        powerup::apply(&mut state, PowerUpKind::Speed, &mut events);
        assert!((state.speed.current - 6.5).abs() < 1e-5);

        obstacle_on_player(&mut state);
        tick(&mut state, &mut rng, SIM_DT);
        assert!(state.speed.slowdown_active());
        assert!((state.speed.current - 3.25).abs() < 1e-5);

        for _ in 0..70 {
            tick(&mut state, &mut rng, SIM_DT);
        }
        assert!(!state.speed.slowdown_active());
        assert!(state.effects.is_active(PowerUpKind::Speed));
        assert_eq!(state.effects.remaining(PowerUpKind::Speed), 109);
        assert!((state.speed.current - 6.5).abs() < 1e-5);
    }

    #[test]
    fn test_hit_counted_until_window_passes() {
        let mut state = playing();
        quiet(&mut state);
        let mut rng = SequenceRng::constant(0.5);
        state.hit_history.record(0.0);

        state.clock = 9.5;
        tick(&mut state, &mut rng, SIM_DT);
        assert_eq!(state.hit_history.len(), 1);

        // Lands the clock on 10.001 s
        state.clock = 10.0;
        tick(&mut state, &mut rng, 0.001);
        assert!(state.hit_history.is_empty());
    }

    #[test]
    fn test_speed_expiry_restores_grown_base() {
        let mut state = playing();
        quiet(&mut state);
        let mut rng = SequenceRng::constant(0.5);

        let center = state.player.bounds().center();
        state.power_ups.push(PowerUp {
            id: 1,
            pos: center - POWERUP_SIZE * 0.5 + Vec2::new(5.0, 0.0),
            size: POWERUP_SIZE,
            kind: PowerUpKind::Speed,
            collected: false,
        });
        tick(&mut state, &mut rng, SIM_DT);
        assert!(state.effects.is_active(PowerUpKind::Speed));
        assert!((state.speed.current - 6.5).abs() < 1e-5);

        // 75+ points while the boost runs
        let mut events = Vec::new();
        score::add_points(&mut state, 80, &mut events);
        assert_eq!(state.speed.base, 5.5);

        for _ in 0..PowerUpKind::Speed.duration() {
            tick(&mut state, &mut rng, SIM_DT);
        }
        assert!(!state.effects.is_active(PowerUpKind::Speed));
        assert_eq!(state.speed.current, state.speed.base);
        assert_eq!(state.speed.current, 5.5);
    }
}
