//! Events emitted by the simulation for the host to consume
//!
//! The core queues these on `GameState::events`; audio, screen effects and the
//! UI drain them once per frame. Nothing in the simulation reads them back.

use serde::{Deserialize, Serialize};

/// Short synthesized tones the audio sink knows how to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Correct keystroke
    Hit,
    /// Wrong keystroke or a word hitting the floor
    Error,
    /// Word destroyed
    Explode,
}

/// Final numbers for a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    pub words_cleared: u32,
    pub wpm: u32,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A keystroke matched the next expected character
    Hit,
    /// A keystroke matched nothing
    Miss,
    /// A word was fully typed
    WordCompleted { text: &'static str, points: u64 },
    /// A word fell past the bottom of the field
    WordExpired { text: &'static str },
    /// Level changed (tiered: level passed, continuous: word count crossed)
    LevelUp { level: u32 },
    /// Session is over
    GameOver(SessionSummary),
}

impl GameEvent {
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::Hit | GameEvent::LevelUp { .. } => Some(SoundEffect::Hit),
            GameEvent::Miss | GameEvent::WordExpired { .. } => Some(SoundEffect::Error),
            GameEvent::WordCompleted { .. } => Some(SoundEffect::Explode),
            GameEvent::GameOver(_) => None,
        }
    }
}
