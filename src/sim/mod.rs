//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (one `Pcg32` per field)
//! - Stable iteration order (hazards are recycled in place, never reordered)
//! - No rendering or platform dependencies

pub mod field;
pub mod rect;
pub mod state;
pub mod tick;

pub use field::{FallObject, FallObjectField, HazardCategory, SetupError};
pub use rect::Rect;
pub use state::{
    Actor, AbilityKind, AbilityState, GameState, MoveIntent, SessionConfig, SessionPhase,
};
pub use tick::{SessionResult, TickInput, tick};
