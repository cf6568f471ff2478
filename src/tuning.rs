//! Data-driven game balance
//!
//! All gameplay numbers live in one immutable [`Tuning`] structure that is
//! passed into session setup. Multiple simulations (e.g. in tests) can run
//! side by side with different tunings without interfering.

use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::AbilityKind;

/// Timing and magnitude for one ability kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityParams {
    /// Seconds between uses, counted from the trigger
    pub cooldown: f32,
    /// Seconds the effect stays in force
    pub duration: f32,
    /// Kind-specific factor: speed multiplier for SpeedBurst, field slow
    /// factor for FieldSlow, unused (1.0) for Invulnerability
    pub magnitude: f32,
}

/// Immutable balance configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Play field dimensions (pixels)
    pub field_width: f32,
    pub field_height: f32,
    /// Entity rectangles are unit squares of this side
    pub unit_size: f32,
    /// Actor horizontal displacement per tick (before ability multiplier)
    pub move_speed: f32,
    /// Health at session start
    pub initial_hp: u32,
    /// Difficulty parameter is valid in 1..=max_difficulty
    pub max_difficulty: u32,
    /// Per-object animation rate drawn from [min, max)
    pub anim_rate_min: f32,
    pub anim_rate_max: f32,
    /// Initial spawn y band (above the field, wide so objects desynchronize)
    pub spawn_band: Range<f32>,
    /// Respawn y band used on recycle
    pub respawn_band: Range<f32>,
    /// Chance per recycle that a hazard's base speed ratchets up
    pub escalation_chance: f32,
    /// Speed gained per escalation, scaled by difficulty
    pub escalation_step: f32,
    pub speed_burst: AbilityParams,
    pub invulnerability: AbilityParams,
    pub field_slow: AbilityParams,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 1280.0,
            field_height: 720.0,
            unit_size: 50.0,
            move_speed: 12.0,
            initial_hp: 3,
            max_difficulty: 10,
            anim_rate_min: 0.1,
            anim_rate_max: 0.2,
            spawn_band: -800.0..-50.0,
            respawn_band: -200.0..-50.0,
            escalation_chance: 0.1,
            escalation_step: 0.1,
            speed_burst: AbilityParams {
                cooldown: 3.0,
                duration: 0.3,
                magnitude: 4.0,
            },
            invulnerability: AbilityParams {
                cooldown: 5.0,
                duration: 2.0,
                magnitude: 1.0,
            },
            field_slow: AbilityParams {
                cooldown: 6.0,
                duration: 1.5,
                magnitude: 0.3,
            },
        }
    }
}

impl Tuning {
    /// Parameters for the given ability kind
    pub fn ability_params(&self, kind: AbilityKind) -> AbilityParams {
        let params = match kind {
            AbilityKind::SpeedBurst => self.speed_burst,
            AbilityKind::Invulnerability => self.invulnerability,
            AbilityKind::FieldSlow => self.field_slow,
        };
        // Cooldown never restarts mid-active-window
        debug_assert!(params.cooldown >= params.duration);
        params
    }

    /// Base fall speed range for newly spawned hazards at a difficulty level
    pub fn spawn_speed_range(&self, difficulty: u32) -> Range<f32> {
        let d = difficulty as f32;
        (1.0 + d * 0.5)..(2.0 + d * 0.8)
    }

    /// Actor start position: bottom center of the field
    pub fn actor_spawn(&self) -> Vec2 {
        Vec2::new(
            (self.field_width - self.unit_size) / 2.0,
            self.field_height - 2.0 * self.unit_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldowns_cover_durations() {
        let tuning = Tuning::default();
        for kind in [
            AbilityKind::SpeedBurst,
            AbilityKind::Invulnerability,
            AbilityKind::FieldSlow,
        ] {
            let p = tuning.ability_params(kind);
            assert!(p.cooldown >= p.duration);
        }
    }

    #[test]
    fn spawn_speed_range_scales_with_difficulty() {
        let tuning = Tuning::default();
        let r1 = tuning.spawn_speed_range(1);
        assert_eq!(r1.start, 1.5);
        assert_eq!(r1.end, 2.8);
        let r5 = tuning.spawn_speed_range(5);
        assert!(r5.start > r1.start && r5.end > r1.end);
    }

    #[test]
    fn actor_spawns_inside_field() {
        let tuning = Tuning::default();
        let spawn = tuning.actor_spawn();
        assert!(spawn.x >= 0.0 && spawn.x + tuning.unit_size <= tuning.field_width);
        assert!(spawn.y + tuning.unit_size <= tuning.field_height);
    }
}
