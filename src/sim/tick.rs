//! Fixed timestep simulation tick
//!
//! One orchestration pass per rendered frame. Each tick is atomic: the caller
//! never observes partial state, and the same seed plus the same input stream
//! replays a session exactly.

use super::state::{AbilityKind, GameState, MoveIntent, SessionPhase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Movement intent from the input-translation collaborator
    pub intent: MoveIntent,
    /// Ability-trigger flag for this tick
    pub trigger_ability: bool,
}

/// What one tick produced, handed to the HUD/score collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionResult {
    /// Hazards that left the field this tick
    pub score_delta: u32,
    /// True iff this tick's collision reduced the actor's health to zero
    pub life_ended: bool,
}

/// Advance the session by one fixed timestep
///
/// Only meaningful while `Running`; in any other phase this is a no-op
/// returning an empty result.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> SessionResult {
    if state.phase != SessionPhase::Running {
        return SessionResult::default();
    }

    state.time_ticks += 1;

    // 1-2: movement, then ability trigger
    state.actor.set_intent(input.intent);
    state.actor.apply_movement(state.tuning.field_width);
    if input.trigger_ability {
        state.actor.trigger_ability();
    }

    // 3: ability timers
    state.actor.tick_ability(dt);

    // 4-5: FieldSlow is the one ability whose side effect targets the field
    let modifier = if state.actor.ability.kind == AbilityKind::FieldSlow && state.actor.ability.active
    {
        state.actor.ability.params.magnitude
    } else {
        1.0
    };
    state.field.broadcast_speed_modifier(modifier);

    // 6: advance hazards, collect exits as score
    let score_delta = state.field.advance_all(state.difficulty);
    state.score += score_delta as u64;

    // 7: resolve at most one contact
    let mut life_ended = false;
    if state.field.check_collision(&state.actor) {
        life_ended = state.actor.take_damage();
    }

    // 8: report and transition
    if life_ended {
        state.phase = SessionPhase::Ended;
        log::info!(
            "life ended after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
    }
    SessionResult {
        score_delta,
        life_ended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::field::{HazardCategory, SetupError};
    use crate::sim::state::SessionConfig;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn config(seed: u64) -> SessionConfig {
        SessionConfig {
            difficulty: 3,
            categories: HazardCategory::ALL.to_vec(),
            actor_kind: AbilityKind::SpeedBurst,
            seed,
        }
    }

    #[test]
    fn start_validates_config() {
        let mut state = GameState::new(Tuning::default());

        let mut bad = config(1);
        bad.categories.clear();
        assert_eq!(state.start(&bad), Err(SetupError::NoCategories));
        assert_eq!(state.phase, SessionPhase::Idle);

        let mut bad = config(1);
        bad.difficulty = 0;
        assert_eq!(state.start(&bad), Err(SetupError::BadDifficulty(0, 10)));

        assert!(state.start(&config(1)).is_ok());
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.field.objects.len(), 6);

        // Starting over a running session is a contract violation
        assert_eq!(state.start(&config(2)), Err(SetupError::SessionRunning));
    }

    #[test]
    fn tick_is_a_noop_outside_running() {
        let mut state = GameState::new(Tuning::default());
        let result = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(result, SessionResult::default());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn score_accumulates_from_exits() {
        let mut state = GameState::new(Tuning::default());
        state.start(&config(5)).unwrap();

        // Force every hazard past the bottom edge
        let bottom = state.tuning.field_height;
        for obj in &mut state.field.objects {
            obj.rect.pos.y = bottom + 10.0;
        }
        let result = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(result.score_delta, 6);
        assert_eq!(state.score, 6);
        assert!(!result.life_ended);
    }

    #[test]
    fn contact_damages_and_ends_life_at_zero() {
        let mut state = GameState::new(Tuning::default());
        state.start(&config(5)).unwrap();

        let initial_hp = state.actor.hp;
        for hit in 1..=initial_hp {
            // Drop a hazard straight onto the actor
            state.field.objects[0].rect.pos = state.actor.rect.pos;
            let result = tick(&mut state, &TickInput::default(), SIM_DT);
            assert_eq!(state.actor.hp, initial_hp - hit);
            if hit == initial_hp {
                assert!(result.life_ended);
                assert_eq!(state.phase, SessionPhase::Ended);
            } else {
                assert!(!result.life_ended);
                assert_eq!(state.phase, SessionPhase::Running);
            }
        }
    }

    #[test]
    fn ended_to_idle_needs_explicit_restart() {
        let mut state = GameState::new(Tuning::default());
        state.start(&config(5)).unwrap();
        state.phase = SessionPhase::Ended;

        // Ticks in Ended change nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.phase, SessionPhase::Ended);

        state.reset_to_idle();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.start(&config(6)).is_ok());
    }

    #[test]
    fn field_slow_broadcasts_while_active_only() {
        let mut state = GameState::new(Tuning::default());
        let mut cfg = config(7);
        cfg.actor_kind = AbilityKind::FieldSlow;
        state.start(&cfg).unwrap();

        let input = TickInput {
            trigger_ability: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.field.field_speed_modifier, 0.3);

        // Run out the 1.5s active window; modifier returns to neutral
        let ticks = (1.5 / SIM_DT) as u32 + 1;
        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.field.field_speed_modifier, 1.0);
    }

    #[test]
    fn same_seed_and_inputs_replay_identically() {
        let mut a = GameState::new(Tuning::default());
        let mut b = GameState::new(Tuning::default());
        a.start(&config(99)).unwrap();
        b.start(&config(99)).unwrap();

        let inputs = [
            TickInput {
                intent: MoveIntent::Left,
                ..Default::default()
            },
            TickInput {
                trigger_ability: true,
                ..Default::default()
            },
            TickInput {
                intent: MoveIntent::Right,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..300 {
            for input in &inputs {
                let ra = tick(&mut a, input, SIM_DT);
                let rb = tick(&mut b, input, SIM_DT);
                assert_eq!(ra, rb);
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.actor.rect, b.actor.rect);
        for (x, y) in a.field.objects.iter().zip(&b.field.objects) {
            assert_eq!(x.rect, y.rect);
            assert_eq!(x.frame, y.frame);
        }
    }

    proptest! {
        #[test]
        fn health_never_increases_and_field_stays_stable(seed in any::<u64>()) {
            let mut state = GameState::new(Tuning::default());
            state.start(&config(seed)).unwrap();
            let object_count = state.field.objects.len();

            let mut last_hp = state.actor.hp;
            for i in 0..240u32 {
                let input = TickInput {
                    intent: if i % 2 == 0 { MoveIntent::Left } else { MoveIntent::Right },
                    trigger_ability: i % 90 == 0,
                };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.actor.hp <= last_hp);
                last_hp = state.actor.hp;
                prop_assert_eq!(state.field.objects.len(), object_count);
                for obj in &state.field.objects {
                    prop_assert!(obj.frame < obj.category.frame_count());
                }
            }
        }
    }
}
