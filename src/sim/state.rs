//! Game state and core simulation types
//!
//! The actor, its timed ability, and the per-session state machine live here.
//! Everything is serializable so a session can be snapshotted or saved.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::{FallObjectField, HazardCategory, SetupError};
use crate::tuning::{AbilityParams, Tuning};

/// Per-tick movement intent, set by the input-translation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveIntent {
    #[default]
    Idle,
    Left,
    Right,
}

/// The actor's special power, fixed for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Quadruples horizontal speed for a short burst
    SpeedBurst,
    /// Fully negates damage while active
    Invulnerability,
    /// Slows every hazard on the field while active
    FieldSlow,
}

/// Cooldown and active-window bookkeeping for the actor's ability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityState {
    pub kind: AbilityKind,
    pub params: AbilityParams,
    /// Seconds until the ability can be used again (0 = ready)
    pub cooldown_remaining: f32,
    /// True while the effect is in force
    pub active: bool,
    /// Seconds left in the active window
    pub active_remaining: f32,
}

impl AbilityState {
    pub fn new(kind: AbilityKind, params: AbilityParams) -> Self {
        Self {
            kind,
            params,
            cooldown_remaining: 0.0,
            active: false,
            active_remaining: 0.0,
        }
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Unit square, owned exclusively by the actor
    pub rect: super::rect::Rect,
    /// Never increases except across `reset`
    pub hp: u32,
    pub intent: MoveIntent,
    pub ability: AbilityState,
    /// Horizontal speed multiplier, 1.0 unless SpeedBurst is active
    pub speed_multiplier: f32,
    /// Damage immunity flag, set only while Invulnerability is active
    pub immune: bool,
    move_speed: f32,
    initial_hp: u32,
}

impl Actor {
    pub fn new(kind: AbilityKind, spawn: Vec2, tuning: &Tuning) -> Self {
        Self {
            rect: super::rect::Rect::square(spawn, tuning.unit_size),
            hp: tuning.initial_hp,
            intent: MoveIntent::Idle,
            ability: AbilityState::new(kind, tuning.ability_params(kind)),
            speed_multiplier: 1.0,
            immune: false,
            move_speed: tuning.move_speed,
            initial_hp: tuning.initial_hp,
        }
    }

    /// Record this tick's movement intent; no immediate effect
    pub fn set_intent(&mut self, intent: MoveIntent) {
        self.intent = intent;
    }

    /// Apply the recorded intent, clamped to the field. Call once per tick.
    pub fn apply_movement(&mut self, field_width: f32) {
        let step = self.move_speed * self.speed_multiplier;
        match self.intent {
            MoveIntent::Left => self.rect.pos.x -= step,
            MoveIntent::Right => self.rect.pos.x += step,
            MoveIntent::Idle => {}
        }
        self.rect.clamp_x(0.0, field_width);
    }

    /// Start the ability if it is ready. Returns false (and changes nothing)
    /// while on cooldown or already active - a rate limit, not an error.
    pub fn trigger_ability(&mut self) -> bool {
        if self.ability.cooldown_remaining > 0.0 || self.ability.active {
            return false;
        }
        self.ability.active = true;
        self.ability.active_remaining = self.ability.params.duration;
        self.ability.cooldown_remaining = self.ability.params.cooldown;
        match self.ability.kind {
            AbilityKind::SpeedBurst => self.speed_multiplier = self.ability.params.magnitude,
            AbilityKind::Invulnerability => self.immune = true,
            // Field-wide effect: the tick orchestration reads `active`
            AbilityKind::FieldSlow => {}
        }
        log::debug!("ability triggered: {:?}", self.ability.kind);
        true
    }

    /// Advance ability timers. Expiry here is the only path that clears the
    /// side effects.
    pub fn tick_ability(&mut self, dt: f32) {
        if self.ability.cooldown_remaining > 0.0 {
            self.ability.cooldown_remaining = (self.ability.cooldown_remaining - dt).max(0.0);
        }
        if self.ability.active {
            self.ability.active_remaining -= dt;
            if self.ability.active_remaining <= 0.0 {
                self.ability.active = false;
                self.ability.active_remaining = 0.0;
                self.speed_multiplier = 1.0;
                self.immune = false;
            }
        }
    }

    /// Lose one health point. Immunity negates the hit entirely. Returns true
    /// iff this hit ended the life episode.
    pub fn take_damage(&mut self) -> bool {
        if self.immune {
            return false;
        }
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }

    /// Reinitialize for a new session: position, health, and all ability state
    pub fn reset(&mut self, spawn: Vec2) {
        self.rect.pos = spawn;
        self.hp = self.initial_hp;
        self.intent = MoveIntent::Idle;
        self.ability.cooldown_remaining = 0.0;
        self.ability.active = false;
        self.ability.active_remaining = 0.0;
        self.speed_multiplier = 1.0;
        self.immune = false;
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session; menus own the screen
    Idle,
    /// Session active, ticking
    Running,
    /// Life expired, awaiting an explicit restart request
    Ended,
}

/// Everything the session-setup collaborator supplies at start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 1..=Tuning::max_difficulty
    pub difficulty: u32,
    /// Non-empty subset of [`HazardCategory::ALL`]
    pub categories: Vec<HazardCategory>,
    pub actor_kind: AbilityKind,
    /// Seed for the field's RNG; same seed + inputs replays the session
    pub seed: u64,
}

/// Complete session state (one actor, one field)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: SessionPhase,
    pub actor: Actor,
    pub field: FallObjectField,
    /// Cumulative hazards survived this session
    pub score: u64,
    pub difficulty: u32,
    pub time_ticks: u64,
    pub tuning: Tuning,
}

impl GameState {
    /// A fresh Idle state with no session
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: SessionPhase::Idle,
            actor: Actor::new(AbilityKind::SpeedBurst, tuning.actor_spawn(), &tuning),
            field: FallObjectField::empty(&tuning),
            score: 0,
            difficulty: 1,
            time_ticks: 0,
            tuning,
        }
    }

    /// Idle -> Running: validate the config, rebuild actor and field
    pub fn start(&mut self, config: &SessionConfig) -> Result<(), SetupError> {
        if self.phase == SessionPhase::Running {
            return Err(SetupError::SessionRunning);
        }
        self.field = FallObjectField::new(
            config.difficulty,
            &config.categories,
            config.seed,
            &self.tuning,
        )?;
        self.actor = Actor::new(config.actor_kind, self.tuning.actor_spawn(), &self.tuning);
        self.difficulty = config.difficulty;
        self.score = 0;
        self.time_ticks = 0;
        self.phase = SessionPhase::Running;
        log::info!(
            "session start: difficulty {}, {} hazards, {:?}",
            config.difficulty,
            self.field.objects.len(),
            config.actor_kind,
        );
        Ok(())
    }

    /// Ended -> Idle, driven by the menu collaborator
    pub fn reset_to_idle(&mut self) {
        self.phase = SessionPhase::Idle;
    }
}
