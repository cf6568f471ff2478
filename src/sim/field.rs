//! Falling hazards and the field that owns them
//!
//! A session spawns a fixed batch of hazards scaled to difficulty. Hazards are
//! never destroyed mid-session: whenever one leaves the bottom of the field or
//! contacts the actor it is recycled in place to a fresh spawn point above the
//! visible field. All randomness flows through one seeded `Pcg32` owned by the
//! field so sessions replay identically from a seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::Rect;
use super::state::Actor;
use crate::tuning::Tuning;

/// Session setup contract violations, surfaced at start time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("no hazard categories enabled")]
    NoCategories,
    #[error("difficulty {0} outside 1..={1}")]
    BadDifficulty(u32, u32),
    #[error("session already running")]
    SessionRunning,
}

/// Hazard category, fixed at creation
///
/// The category picks the sprite sheet on the render side; the simulation only
/// cares about its animation cycle length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardCategory {
    Blue,
    Dark,
    Purple,
}

impl HazardCategory {
    /// All categories a session may enable
    pub const ALL: [HazardCategory; 3] = [
        HazardCategory::Blue,
        HazardCategory::Dark,
        HazardCategory::Purple,
    ];

    /// Animation frames in this category's cycle
    pub fn frame_count(&self) -> u32 {
        match self {
            HazardCategory::Blue => 4,
            HazardCategory::Dark | HazardCategory::Purple => 6,
        }
    }
}

/// A single falling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallObject {
    pub rect: Rect,
    pub category: HazardCategory,
    /// Fall speed drawn at spawn; only ever increases (escalation ratchet)
    pub base_speed: f32,
    /// External field-wide multiplier, 1.0 unless an ability overrides it
    pub speed_modifier: f32,
    /// Current animation frame, always in [0, frame_count)
    pub frame: u32,
    /// Frame advance per tick before the speed modifier
    pub anim_rate: f32,
    /// Accumulates anim progress; a frame flips when it crosses 1.0
    pub anim_counter: f32,
}

impl FallObject {
    /// Move down one tick's displacement and advance the animation
    pub fn advance(&mut self) {
        self.rect.pos.y += self.base_speed * self.speed_modifier;

        self.anim_counter += self.anim_rate * self.speed_modifier;
        if self.anim_counter >= 1.0 {
            // Fractional overflow is deliberately dropped, not carried over
            self.anim_counter = 0.0;
            self.frame = (self.frame + 1) % self.category.frame_count();
        }
    }

    /// True once the top edge has passed the bottom of the field
    pub fn is_off_field(&self, field_height: f32) -> bool {
        self.rect.top() > field_height
    }

    /// Reposition to a fresh spawn point above the visible field
    pub fn recycle(&mut self, field_width: f32, band: std::ops::Range<f32>, rng: &mut Pcg32) {
        self.rect.pos.x = rng.random_range(0.0..field_width - self.rect.size.x);
        self.rect.pos.y = rng.random_range(band);
    }

    /// Small chance to permanently speed up; compounds over a session
    pub fn maybe_escalate_speed(
        &mut self,
        difficulty: u32,
        chance: f32,
        step: f32,
        rng: &mut Pcg32,
    ) {
        if rng.random::<f32>() < chance {
            self.base_speed += step * difficulty as f32;
        }
    }

    pub fn set_speed_modifier(&mut self, modifier: f32) {
        self.speed_modifier = modifier;
    }
}

/// Owns every hazard of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallObjectField {
    /// Stable order: objects are recycled in place, never inserted or removed
    pub objects: Vec<FallObject>,
    /// Broadcast to every object each tick
    pub field_speed_modifier: f32,
    field_width: f32,
    field_height: f32,
    respawn_band: std::ops::Range<f32>,
    escalation_chance: f32,
    escalation_step: f32,
    rng: Pcg32,
}

impl FallObjectField {
    /// An empty field (Idle phase placeholder before a session starts)
    pub fn empty(tuning: &Tuning) -> Self {
        Self {
            objects: Vec::new(),
            field_speed_modifier: 1.0,
            field_width: tuning.field_width,
            field_height: tuning.field_height,
            respawn_band: tuning.respawn_band.clone(),
            escalation_chance: tuning.escalation_chance,
            escalation_step: tuning.escalation_step,
            rng: Pcg32::seed_from_u64(0),
        }
    }

    /// Spawn `difficulty * 2` hazards drawn from the enabled categories
    pub fn new(
        difficulty: u32,
        enabled: &[HazardCategory],
        seed: u64,
        tuning: &Tuning,
    ) -> Result<Self, SetupError> {
        if enabled.is_empty() {
            return Err(SetupError::NoCategories);
        }
        if difficulty < 1 || difficulty > tuning.max_difficulty {
            return Err(SetupError::BadDifficulty(difficulty, tuning.max_difficulty));
        }

        let mut field = Self::empty(tuning);
        field.rng = Pcg32::seed_from_u64(seed);

        let count = (difficulty * 2) as usize;
        let speed_range = tuning.spawn_speed_range(difficulty);
        field.objects.reserve(count);
        for _ in 0..count {
            let category = enabled[field.rng.random_range(0..enabled.len())];
            let pos = Vec2::new(
                field
                    .rng
                    .random_range(0.0..tuning.field_width - tuning.unit_size),
                field.rng.random_range(tuning.spawn_band.clone()),
            );
            let base_speed = field.rng.random_range(speed_range.clone());
            let anim_rate = field
                .rng
                .random_range(tuning.anim_rate_min..tuning.anim_rate_max);
            field.objects.push(FallObject {
                rect: Rect::square(pos, tuning.unit_size),
                category,
                base_speed,
                speed_modifier: 1.0,
                frame: 0,
                anim_rate,
                anim_counter: 0.0,
            });
        }

        Ok(field)
    }

    /// Set every object's speed modifier; called once per tick before
    /// [`advance_all`](Self::advance_all)
    pub fn broadcast_speed_modifier(&mut self, modifier: f32) {
        self.field_speed_modifier = modifier;
        for obj in &mut self.objects {
            obj.set_speed_modifier(modifier);
        }
    }

    /// Advance every object exactly once; recycle off-field exits and return
    /// the number of exits as this tick's score delta
    pub fn advance_all(&mut self, difficulty: u32) -> u32 {
        let Self {
            objects,
            rng,
            field_width,
            field_height,
            respawn_band,
            escalation_chance,
            escalation_step,
            ..
        } = self;

        let mut score_delta = 0;
        for obj in objects.iter_mut() {
            obj.advance();
            if obj.is_off_field(*field_height) {
                obj.recycle(*field_width, respawn_band.clone(), rng);
                score_delta += 1;
                obj.maybe_escalate_speed(difficulty, *escalation_chance, *escalation_step, rng);
            }
        }
        score_delta
    }

    /// Resolve contact with the actor: the first overlapping object is
    /// recycled and the check stops there (at most one contact per tick)
    pub fn check_collision(&mut self, actor: &Actor) -> bool {
        let Self {
            objects,
            rng,
            field_width,
            respawn_band,
            ..
        } = self;

        for obj in objects.iter_mut() {
            if obj.rect.intersects(&actor.rect) {
                obj.recycle(*field_width, respawn_band.clone(), rng);
                return true;
            }
        }
        false
    }
}
