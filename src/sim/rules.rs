//! Scoring and leveling rules
//!
//! Two rule sets, picked when the session starts:
//! - `Tiered`: each level has a score target to reach before its 60s clock
//!   runs out. Pass and the next level starts on an empty field; miss and the
//!   run is over. Each word is worth the level number.
//! - `Continuous`: one 60s clock for the whole run. Level follows the number
//!   of words cleared and only speeds up spawning. Each word is worth
//!   10 points per letter.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::particles;
use super::state::{GamePhase, GameState, ParticleKind};
use crate::consts::*;

/// Words per level step in continuous mode
pub const WORDS_PER_LEVEL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RuleSet {
    #[default]
    Tiered,
    Continuous,
}

impl RuleSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSet::Tiered => "Tiered",
            RuleSet::Continuous => "Continuous",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tiered" | "arcade" => Some(RuleSet::Tiered),
            "continuous" | "endless" => Some(RuleSet::Continuous),
            _ => None,
        }
    }

    /// Points for clearing a word
    pub fn reward(&self, level: u32, word_len: usize) -> u64 {
        match self {
            RuleSet::Tiered => level as u64,
            RuleSet::Continuous => 10 * word_len as u64,
        }
    }

    /// Score needed to pass `level` (tiered only)
    pub fn level_target(&self, level: u32) -> Option<u64> {
        match self {
            // (10 + 2L) words at L points each
            RuleSet::Tiered => {
                let level = level as u64;
                Some((10 + level * 2) * level)
            }
            RuleSet::Continuous => None,
        }
    }

    /// Level implied by a cleared-word count (continuous only)
    pub fn level_for_words(words_cleared: u32) -> u32 {
        1 + words_cleared / WORDS_PER_LEVEL
    }

    /// Milliseconds between spawns at `level`
    pub fn spawn_interval_ms(&self, level: u32) -> f32 {
        match self {
            RuleSet::Tiered => match level {
                0 | 1 => 2000.0,
                2 => 1800.0,
                _ => (1800.0 - level as f32 * 120.0).max(600.0),
            },
            RuleSet::Continuous => {
                (2000.0 - level.saturating_sub(1) as f32 * 200.0).max(500.0)
            }
        }
    }

    /// Seconds added to the clock per cleared word
    pub fn completion_bonus(&self) -> f32 {
        0.5
    }

    /// Seconds taken off the clock when a word hits the floor
    pub fn expiry_penalty(&self) -> f32 {
        match self {
            RuleSet::Tiered => 3.0,
            RuleSet::Continuous => 5.0,
        }
    }

    /// Base fall speed in pixels per 60 Hz frame
    pub fn base_speed(level: u32) -> f32 {
        if level <= 2 {
            0.3 + level as f32 * 0.1
        } else {
            0.5 + level as f32 * 0.1
        }
    }
}

/// Score and remove the word at `index`
pub(crate) fn complete_word(state: &mut GameState, index: usize) {
    let word = state.remove_word(index);
    state.target = None;

    particles::emit(state, word.pos, ParticleKind::Spark, BURST_PARTICLES);

    let points = state.rules().reward(state.level, word.len());
    state.score += points;
    state.level_score += points;
    state.words_cleared += 1;
    state.time_remaining += state.rules().completion_bonus();

    state.push_event(GameEvent::WordCompleted {
        text: word.text,
        points,
    });

    if state.rules() == RuleSet::Continuous {
        let level = RuleSet::level_for_words(state.words_cleared);
        if level != state.level {
            state.level = level;
            log::info!("Level {} ({} words)", level, state.words_cleared);
            state.push_event(GameEvent::LevelUp { level });
        }
    }
}

/// Penalize and remove the word at `index`, which fell off the field
pub(crate) fn expire_word(state: &mut GameState, index: usize) {
    let word = state.remove_word(index);

    let at = Vec2::new(word.pos.x, state.config.field_height);
    particles::emit(state, at, ParticleKind::Blast, BURST_PARTICLES);

    state.time_remaining -= state.rules().expiry_penalty();
    log::debug!("'{}' hit the floor", word.text);
    state.push_event(GameEvent::WordExpired { text: word.text });
}

/// The clock ran out: pass the level or end the run
pub(crate) fn timer_expired(state: &mut GameState) {
    match (state.rules(), state.level_target) {
        (RuleSet::Tiered, Some(target)) if state.level_score >= target => advance_level(state),
        _ => end_game(state),
    }
}

/// Move on to the next tiered level on a clean field
pub(crate) fn advance_level(state: &mut GameState) {
    state.level += 1;
    state.time_remaining = TIME_BUDGET;
    state.level_score = 0;
    state.level_target = state.rules().level_target(state.level);
    state.words.clear();
    state.target = None;
    state.spawn_timer_ms = 0.0;

    log::info!(
        "Level {} (target {})",
        state.level,
        state.level_target.unwrap_or(0)
    );
    state.push_event(GameEvent::LevelUp { level: state.level });
}

pub(crate) fn end_game(state: &mut GameState) {
    state.time_remaining = 0.0;
    state.target = None;
    state.phase = GamePhase::GameOver;

    let summary = state.summary();
    log::info!(
        "Game over: score {}, {} words, {} wpm, level {}",
        summary.score,
        summary.words_cleared,
        summary.wpm,
        summary.level
    );
    state.push_event(GameEvent::GameOver(summary));
}
