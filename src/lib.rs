//! Drop Dodge - a falling-hazard dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, per-tick update, collision)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `highscores`: Local leaderboard
//!
//! Rendering, audio and input translation are external collaborators: they
//! feed a [`sim::TickInput`] into [`sim::tick`] once per frame and read the
//! public simulation state back as their draw snapshot.

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{AbilityParams, Tuning};

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
}
