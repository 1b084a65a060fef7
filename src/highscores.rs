//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks top 10 scores.

use serde::{Deserialize, Serialize};

use crate::platform::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Name recorded when the player leaves the field blank
pub const ANONYMOUS: &str = "UNK";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    /// Words per minute over the run
    #[serde(default)]
    pub wpm: u32,
    /// Display date, as formatted when the score was saved
    #[serde(default)]
    pub date: String,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "typingGameLeaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse stored JSON. Anything unreadable is an empty board.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(mut scores) => {
                scores.normalize();
                scores
            }
            Err(e) => {
                log::warn!("Discarding unreadable leaderboard: {}", e);
                Self::new()
            }
        }
    }

    /// Check if a score would make the board
    pub fn is_high_score(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Whether to prompt for a name at the end of a run
    pub fn should_prompt(&self, score: u64) -> bool {
        score > 0 && self.is_high_score(score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.is_high_score(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a score, keeping the board sorted and capped.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn save_score(&mut self, name: &str, score: u64, wpm: u32, date: &str) -> Option<usize> {
        let entry = HighScoreEntry {
            name: clean_name(name),
            score,
            wpm,
            date: date.to_string(),
        };

        // Ties go after existing entries
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort descending by score and cap the length
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Load high scores from storage
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Some(json) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores to storage
    pub fn persist(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set(Self::STORAGE_KEY, &json) {
                    log::info!("High scores saved ({} entries)", self.entries.len());
                } else {
                    log::warn!("High scores could not be written");
                }
            }
            Err(e) => log::warn!("High scores not serialized: {}", e),
        }
    }
}

/// Trimmed, upper-cased player name; blank becomes `UNK`
pub fn clean_name(name: &str) -> String {
    let name = name.trim().to_uppercase();
    if name.is_empty() {
        ANONYMOUS.to_string()
    } else {
        name
    }
}
