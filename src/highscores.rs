//! High score leaderboard system
//!
//! Local JSON file, tracks the top 10 scores with the difficulty they were
//! earned at.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Hazards survived in the session
    pub score: u64,
    /// Difficulty the session was played at
    pub difficulty: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted best-first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Default leaderboard file name
    pub const FILE_NAME: &'static str = "drop_dodge_highscores.json";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score (if it qualifies), keeping the list sorted and capped
    pub fn add(&mut self, score: u64, difficulty: u32, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                difficulty,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Best score so far, 0 if none
    pub fn best(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// Load from a JSON file, empty on any failure
    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Save as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn add_keeps_sorted_order_and_cap() {
        let mut scores = HighScores::new();
        for s in [30u64, 10, 50, 20, 40, 60, 5, 15, 25, 35, 45] {
            scores.add(s, 3, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.best(), 60);
        for pair in scores.entries.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // 5 fell off the bottom
        assert!(scores.entries.iter().all(|e| e.score != 5));
    }

    #[test]
    fn rank_is_one_indexed() {
        let mut scores = HighScores::new();
        scores.add(100, 5, 0.0);
        scores.add(50, 5, 0.0);
        assert_eq!(scores.potential_rank(75), Some(2));
        assert_eq!(scores.potential_rank(200), Some(1));
    }

    #[test]
    fn full_board_rejects_low_scores() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add(s * 10, 1, 0.0);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(9), None);
        assert!(scores.qualifies(11));
    }
}
