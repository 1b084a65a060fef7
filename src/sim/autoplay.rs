//! Idle/demo player
//!
//! Types at a fixed rate, always going for the word closest to the floor.
//! Drives the native demo binary.

use super::state::{GameState, Word};

/// The key a perfect player would press next, if any
pub fn next_key(state: &GameState) -> Option<char> {
    if let Some(word) = state.target_word() {
        return word.expected();
    }

    state
        .words
        .iter()
        .fold(None, |best: Option<&Word>, w| match best {
            Some(b) if b.pos.y >= w.pos.y => Some(b),
            _ => Some(w),
        })
        .and_then(|w| w.first_char())
}

/// Rate-limited autoplayer
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    keys_per_second: f32,
    budget: f32,
}

impl AutoPlayer {
    pub fn new(keys_per_second: f32) -> Self {
        Self {
            keys_per_second: keys_per_second.max(0.0),
            budget: 0.0,
        }
    }

    /// Returns a key when enough time has built up to press one
    pub fn poll(&mut self, state: &GameState, dt: f32) -> Option<char> {
        self.budget = (self.budget + dt * self.keys_per_second).min(1.0);
        if self.budget < 1.0 {
            return None;
        }
        let key = next_key(state)?;
        self.budget -= 1.0;
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::rules::RuleSet;
    use crate::sim::state::{GameConfig, GamePhase};
    use crate::sim::tick::{TickInput, tick};
    use glam::Vec2;

    #[test]
    fn test_next_key_prefers_target() {
        let mut state = GameState::new(GameConfig::default());
        state.level = 3;
        let id = state.push_word("host", Vec2::new(100.0, 50.0), 0.0);
        state.push_word("ping", Vec2::new(300.0, 500.0), 0.0);
        assert_eq!(next_key(&state), Some('p'));

        state.target = Some(id);
        state.words[0].matched = 1;
        assert_eq!(next_key(&state), Some('o'));
    }

    #[test]
    fn test_next_key_empty_field() {
        let state = GameState::new(GameConfig::default());
        assert_eq!(next_key(&state), None);
    }

    #[test]
    fn test_rate_limit() {
        let mut state = GameState::new(GameConfig::default());
        state.push_word("a", Vec2::new(100.0, 50.0), 0.0);
        let mut bot = AutoPlayer::new(2.0);
        assert_eq!(bot.poll(&state, 0.25), None);
        assert_eq!(bot.poll(&state, 0.25), Some('a'));
        assert_eq!(bot.poll(&state, 0.25), None);
    }

    #[test]
    fn test_bot_clears_first_tiered_level() {
        let mut state = GameState::new(GameConfig {
            seed: 1234,
            ..Default::default()
        });
        let mut bot = AutoPlayer::new(8.0);

        while state.level == 1 && state.phase == GamePhase::Playing {
            let input = TickInput {
                keys: bot.poll(&state, SIM_DT).into_iter().collect(),
                pause: false,
            };
            tick(&mut state, &input, SIM_DT);
        }

        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_bot_continuous_session_scores() {
        let mut state = GameState::new(GameConfig {
            rules: RuleSet::Continuous,
            seed: 77,
            ..Default::default()
        });
        let mut bot = AutoPlayer::new(10.0);

        while state.phase == GamePhase::Playing {
            let input = TickInput {
                keys: bot.poll(&state, SIM_DT).into_iter().collect(),
                pause: false,
            };
            tick(&mut state, &input, SIM_DT);
        }

        assert!(state.words_cleared >= 5);
        assert!(state.level >= 2);
        assert!(state.score > 0);
        assert!(state.summary().wpm > 0);
    }
}
