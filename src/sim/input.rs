//! Keystroke matching
//!
//! Letter levels consume the lowest falling letter that equals the key, with
//! no lock. Word levels lock onto the lowest word starting with the key and
//! route every following key to it until it is finished or falls off.

use glam::Vec2;

use super::events::GameEvent;
use super::particles;
use super::rules;
use super::state::{GamePhase, GameState, ParticleKind, Word};
use crate::consts::*;

/// What a keystroke did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a playable key, or the game isn't running
    Ignored,
    /// Matched nothing; state unchanged
    Miss,
    /// Advanced a word without finishing it
    Progress,
    /// Finished a word
    Completed,
}

/// Feed one typed character into the game
pub fn handle_key(state: &mut GameState, key: char) -> KeyOutcome {
    if state.phase != GamePhase::Playing || key.is_control() {
        return KeyOutcome::Ignored;
    }
    let ch = key.to_lowercase().next().unwrap_or(key);

    if state.is_letter_level() {
        return match_letter(state, ch);
    }

    let index = match state.target_index() {
        Some(i) => i,
        None => match most_urgent(&state.words, |w| w.first_char() == Some(ch)) {
            Some(i) => {
                state.target = Some(state.words[i].id);
                log::debug!("Locked onto '{}'", state.words[i].text);
                i
            }
            None => return miss(state),
        },
    };

    advance_word(state, index, ch)
}

/// Index of the matching word closest to the floor; ties go to the earliest spawn
fn most_urgent(words: &[Word], mut matches: impl FnMut(&Word) -> bool) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, word) in words.iter().enumerate() {
        if !matches(word) {
            continue;
        }
        if best.is_none_or(|(_, y)| word.pos.y > y) {
            best = Some((i, word.pos.y));
        }
    }
    best.map(|(i, _)| i)
}

fn match_letter(state: &mut GameState, ch: char) -> KeyOutcome {
    let found = most_urgent(&state.words, |w| w.len() == 1 && w.first_char() == Some(ch));
    match found {
        Some(index) => {
            state.words[index].matched = 1;
            state.push_event(GameEvent::Hit);
            rules::complete_word(state, index);
            KeyOutcome::Completed
        }
        None => miss(state),
    }
}

fn advance_word(state: &mut GameState, index: usize, ch: char) -> KeyOutcome {
    let word = &mut state.words[index];
    if !word.advance(ch) {
        return miss(state);
    }

    let at = Vec2::new(
        word.pos.x + word.matched as f32 * GLYPH_ADVANCE,
        word.pos.y,
    );
    let complete = word.is_complete();

    state.push_event(GameEvent::Hit);
    particles::emit(state, at, ParticleKind::Spark, HIT_PARTICLES);

    if complete {
        rules::complete_word(state, index);
        KeyOutcome::Completed
    } else {
        KeyOutcome::Progress
    }
}

fn miss(state: &mut GameState) -> KeyOutcome {
    state.push_event(GameEvent::Miss);
    KeyOutcome::Miss
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rules::RuleSet;
    use crate::sim::state::GameConfig;
    use crate::words::WordPool;
    use proptest::prelude::*;

    fn word_level_state(rules: RuleSet) -> GameState {
        let mut state = GameState::new(GameConfig {
            rules,
            ..Default::default()
        });
        state.level = 3;
        state
    }

    fn targeted_count(state: &GameState) -> usize {
        state
            .words
            .iter()
            .filter(|w| state.target == Some(w.id))
            .count()
    }

    #[test]
    fn test_lock_picks_lowest_word() {
        let mut state = word_level_state(RuleSet::Tiered);
        state.push_word("code", Vec2::new(200.0, 100.0), 0.0);
        let low = state.push_word("core", Vec2::new(400.0, 300.0), 0.0);
        state.push_word("data", Vec2::new(600.0, 500.0), 0.0);

        assert_eq!(handle_key(&mut state, 'c'), KeyOutcome::Progress);
        assert_eq!(state.target, Some(low));
        assert_eq!(state.target_word().map(|w| w.matched), Some(1));
    }

    #[test]
    fn test_lock_tie_goes_to_first_spawned() {
        let mut state = word_level_state(RuleSet::Tiered);
        let first = state.push_word("code", Vec2::new(200.0, 300.0), 0.0);
        state.push_word("core", Vec2::new(400.0, 300.0), 0.0);

        handle_key(&mut state, 'c');
        assert_eq!(state.target, Some(first));
    }

    #[test]
    fn test_locked_word_takes_all_keys() {
        let mut state = word_level_state(RuleSet::Tiered);
        let id = state.push_word("host", Vec2::new(200.0, 100.0), 0.0);
        // A lower word also starting with 'o' must not steal the second key
        state.push_word("open", Vec2::new(400.0, 600.0), 0.0);

        handle_key(&mut state, 'h');
        assert_eq!(handle_key(&mut state, 'o'), KeyOutcome::Progress);
        assert_eq!(state.target, Some(id));
        assert_eq!(state.target_word().map(|w| w.matched), Some(2));
    }

    #[test]
    fn test_host_third_letter() {
        let mut state = word_level_state(RuleSet::Tiered);
        let id = state.push_word("host", Vec2::new(200.0, 100.0), 0.0);
        state.words[0].matched = 2;
        state.target = Some(id);

        assert_eq!(handle_key(&mut state, 's'), KeyOutcome::Progress);
        assert_eq!(state.words[0].matched, 3);
        assert!(!state.words[0].is_complete());
        assert_eq!(state.target, Some(id));
    }

    #[test]
    fn test_finish_go_tiered() {
        let mut state = word_level_state(RuleSet::Tiered);
        let id = state.push_word("go", Vec2::new(200.0, 100.0), 0.0);
        state.words[0].matched = 1;
        state.target = Some(id);

        assert_eq!(handle_key(&mut state, 'o'), KeyOutcome::Completed);
        assert!(state.words.is_empty());
        assert_eq!(state.target, None);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_finish_go_continuous() {
        let mut state = word_level_state(RuleSet::Continuous);
        let id = state.push_word("go", Vec2::new(200.0, 100.0), 0.0);
        state.words[0].matched = 1;
        state.target = Some(id);

        assert_eq!(handle_key(&mut state, 'o'), KeyOutcome::Completed);
        assert!(state.words.is_empty());
        assert_eq!(state.target, None);
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_wrong_key_keeps_word() {
        let mut state = word_level_state(RuleSet::Tiered);
        let id = state.push_word("host", Vec2::new(200.0, 100.0), 0.0);
        handle_key(&mut state, 'h');
        state.events.clear();

        assert_eq!(handle_key(&mut state, 'x'), KeyOutcome::Miss);
        assert_eq!(state.target, Some(id));
        assert_eq!(state.words[0].matched, 1);
        assert_eq!(state.events, vec![GameEvent::Miss]);
    }

    #[test]
    fn test_no_candidate_is_miss() {
        let mut state = word_level_state(RuleSet::Tiered);
        state.push_word("host", Vec2::new(200.0, 100.0), 0.0);

        assert_eq!(handle_key(&mut state, 'z'), KeyOutcome::Miss);
        assert_eq!(state.target, None);
        assert_eq!(state.words[0].matched, 0);
    }

    #[test]
    fn test_uppercase_is_folded() {
        let mut state = word_level_state(RuleSet::Tiered);
        state.push_word("host", Vec2::new(200.0, 100.0), 0.0);
        assert_eq!(handle_key(&mut state, 'H'), KeyOutcome::Progress);
    }

    #[test]
    fn test_ignored_keys() {
        let mut state = word_level_state(RuleSet::Tiered);
        state.push_word("host", Vec2::new(200.0, 100.0), 0.0);
        assert_eq!(handle_key(&mut state, '\n'), KeyOutcome::Ignored);

        state.phase = GamePhase::Paused;
        assert_eq!(handle_key(&mut state, 'h'), KeyOutcome::Ignored);
        assert!(state.events.is_empty());
        assert_eq!(state.target, None);
    }

    #[test]
    fn test_letter_level_takes_lowest_without_lock() {
        let mut state = GameState::new(GameConfig::default());
        state.push_word("k", Vec2::new(200.0, 100.0), 0.0);
        let low = state.push_word("k", Vec2::new(400.0, 400.0), 0.0);
        state.push_word("j", Vec2::new(600.0, 600.0), 0.0);

        assert_eq!(handle_key(&mut state, 'k'), KeyOutcome::Completed);
        assert!(state.word_index(low).is_none());
        assert_eq!(state.words.len(), 2);
        assert_eq!(state.target, None);
        assert_eq!(state.score, 1);
        assert_eq!(
            state.events,
            vec![
                GameEvent::Hit,
                GameEvent::WordCompleted {
                    text: "k",
                    points: 1
                }
            ]
        );

        assert_eq!(handle_key(&mut state, 'q'), KeyOutcome::Miss);
    }

    #[test]
    fn test_practice_never_letter_mode() {
        let mut state = GameState::new(GameConfig {
            pool: WordPool::Practice(crate::words::Difficulty::Easy),
            ..Default::default()
        });
        let id = state.push_word("echo", Vec2::new(200.0, 100.0), 0.0);
        assert_eq!(handle_key(&mut state, 'e'), KeyOutcome::Progress);
        assert_eq!(state.target, Some(id));
    }

    proptest! {
        #[test]
        fn prop_match_bounds_and_single_target(
            keys in proptest::collection::vec(proptest::char::range('a', 'z'), 0..200),
            seed in any::<u64>(),
        ) {
            let mut state = word_level_state(RuleSet::Tiered);
            state.config.seed = seed;
            state.rng = rand::SeedableRng::seed_from_u64(seed);
            for _ in 0..8 {
                state.spawn_word();
                let y = state.words.len() as f32 * 40.0;
                if let Some(w) = state.words.last_mut() {
                    w.pos.y = y;
                }
            }

            for key in keys {
                handle_key(&mut state, key);
                prop_assert!(targeted_count(&state) <= 1);
                if let Some(id) = state.target {
                    prop_assert!(state.word_index(id).is_some());
                }
                for w in &state.words {
                    prop_assert!(w.matched <= w.len());
                    prop_assert!(w.matched < w.len(), "finished words must be removed");
                }
            }
        }
    }
}
