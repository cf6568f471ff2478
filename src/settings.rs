//! Game settings and preferences
//!
//! Persisted separately from session state as a JSON file next to the
//! executable. The simulation never reads these; they belong to the audio and
//! HUD collaborators.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio (0.0 - 1.0) ===
    /// Menu click sound
    pub click_volume: f32,
    /// Contact thud
    pub collision_volume: f32,
    /// Background music
    pub music_volume: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Minimize flashes on damage/game over
    pub reduced_flash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            click_volume: 0.7,
            collision_volume: 0.8,
            music_volume: 0.3,
            show_fps: false,
            reduced_flash: false,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "drop_dodge_settings.json";

    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("settings file corrupt ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Save as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }
}
