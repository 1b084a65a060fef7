//! Game state and core simulation types
//!
//! One `GameState` is the whole session. Starting a new game replaces it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{GameEvent, SessionSummary};
use super::rules::RuleSet;
use crate::consts::*;
use crate::words::WordPool;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Clock running, words falling
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// A falling word
#[derive(Debug, Clone)]
pub struct Word {
    pub id: u32,
    pub text: &'static str,
    /// x is fixed at spawn, y grows as the word falls
    pub pos: Vec2,
    /// Fall speed in pixels per second
    pub speed: f32,
    /// Count of correctly typed leading characters (0..=len)
    pub matched: usize,
}

impl Word {
    pub fn new(id: u32, text: &'static str, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            text,
            pos,
            speed,
            matched: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    /// Next character the player has to type
    pub fn expected(&self) -> Option<char> {
        self.text.chars().nth(self.matched)
    }

    pub fn is_complete(&self) -> bool {
        self.matched >= self.len()
    }

    /// Consume `ch` if it is the expected character. Returns true on a match.
    pub fn advance(&mut self, ch: char) -> bool {
        if self.expected() == Some(ch) {
            self.matched += 1;
            true
        } else {
            false
        }
    }

    pub fn fall(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }
}

/// Particle color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Green spark from a hit or a completed word
    Spark,
    /// Red debris from a word hitting the floor
    Blast,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub life: f32, // 0-1, decreases over time
}

/// Session setup, fixed for the lifetime of a `GameState`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub rules: RuleSet,
    pub pool: WordPool,
    pub field_width: f32,
    pub field_height: f32,
    /// Run seed for reproducibility
    pub seed: u64,
    pub max_particles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            pool: WordPool::default(),
            field_width: 1280.0,
            field_height: 720.0,
            seed: 0,
            max_particles: MAX_PARTICLES,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Active words in spawn order
    pub words: Vec<Word>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// ID of the locked word, if any
    pub target: Option<u32>,
    pub score: u64,
    pub level: u32,
    /// Points earned in the current level (tiered)
    pub level_score: u64,
    /// Points needed to pass the current level (tiered)
    pub level_target: Option<u64>,
    /// Seconds left on the clock; may dip below zero until the next tick
    pub time_remaining: f32,
    pub words_cleared: u32,
    /// Seconds of play so far
    pub elapsed: f32,
    pub spawn_timer_ms: f32,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session
    pub fn new(config: GameConfig) -> Self {
        let rules = config.rules;
        let seed = config.seed;
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            words: Vec::new(),
            particles: Vec::new(),
            target: None,
            score: 0,
            level: 1,
            level_score: 0,
            level_target: rules.level_target(1),
            time_remaining: TIME_BUDGET,
            words_cleared: 0,
            elapsed: 0.0,
            spawn_timer_ms: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rules(&self) -> RuleSet {
        self.config.rules
    }

    /// Whether the current level uses instant single-letter matching
    pub fn is_letter_level(&self) -> bool {
        self.config.pool.is_letter_level(self.level)
    }

    /// Add a word at an explicit position. Returns its ID.
    pub fn push_word(&mut self, text: &'static str, pos: Vec2, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.words.push(Word::new(id, text, pos, speed));
        id
    }

    /// Spawn a word from the pool for the current level at the top of the field
    pub fn spawn_word(&mut self) -> u32 {
        let text = self.config.pool.select_word(&mut self.rng, self.level);

        let span = self.config.field_width - SPAWN_MARGIN * 2.0;
        let x = if span > 0.0 {
            self.rng.random::<f32>() * span + SPAWN_MARGIN
        } else {
            self.config.field_width / 2.0
        };

        let jitter = self.rng.random_range(SPEED_JITTER_MIN..SPEED_JITTER_MAX);
        let speed = RuleSet::base_speed(self.level) * jitter * FRAME_RATE;

        let id = self.push_word(text, Vec2::new(x, SPAWN_Y), speed);
        log::debug!("Spawned '{}' (id {}) at x={:.0}", text, id, x);
        id
    }

    pub fn word_index(&self, id: u32) -> Option<usize> {
        self.words.iter().position(|w| w.id == id)
    }

    /// Index of the locked word, if the lock is live
    pub fn target_index(&self) -> Option<usize> {
        self.target.and_then(|id| self.word_index(id))
    }

    pub fn target_word(&self) -> Option<&Word> {
        self.target_index().map(|i| &self.words[i])
    }

    /// Remove a word, dropping the target lock if it pointed at it
    pub fn remove_word(&mut self, index: usize) -> Word {
        let word = self.words.remove(index);
        if self.target == Some(word.id) {
            self.target = None;
        }
        word
    }

    /// Whole words per elapsed minute, floored.
    ///
    /// Counts simulated play time, not wall-clock time since the start: paused
    /// stretches and frames the host drops under load don't lower the rate.
    pub fn wpm(&self) -> u32 {
        if self.elapsed <= 0.0 {
            return 0;
        }
        (self.words_cleared as f32 / (self.elapsed / 60.0)).floor() as u32
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            words_cleared: self.words_cleared,
            wpm: self.wpm(),
            level: self.level,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Toggle between Playing and Paused. No effect after game over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Follow a canvas resize. Words already falling keep their x.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.field_width = width;
        self.config.field_height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(GameConfig::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.level_target, Some(12));
        assert_eq!(state.time_remaining, TIME_BUDGET);
        assert!(state.words.is_empty());
        assert!(state.target.is_none());
    }

    #[test]
    fn test_word_advance() {
        let mut word = Word::new(1, "host", Vec2::ZERO, 0.0);
        assert_eq!(word.expected(), Some('h'));
        assert!(!word.advance('x'));
        assert_eq!(word.matched, 0);
        assert!(word.advance('h'));
        assert!(word.advance('o'));
        assert_eq!(word.expected(), Some('s'));
        assert!(word.advance('s'));
        assert!(word.advance('t'));
        assert!(word.is_complete());
        // Nothing left to match
        assert!(!word.advance('t'));
        assert_eq!(word.matched, word.len());
    }

    #[test]
    fn test_spawn_within_field() {
        let mut state = GameState::new(GameConfig {
            field_width: 800.0,
            seed: 3,
            ..Default::default()
        });
        for _ in 0..100 {
            state.spawn_word();
        }
        for w in &state.words {
            assert!(w.pos.x >= SPAWN_MARGIN && w.pos.x <= 800.0 - SPAWN_MARGIN);
            assert_eq!(w.pos.y, SPAWN_Y);
            // Level 1 base is 0.4 px/frame
            assert!(w.speed >= 0.4 * SPEED_JITTER_MIN * FRAME_RATE - 0.001);
            assert!(w.speed <= 0.4 * SPEED_JITTER_MAX * FRAME_RATE + 0.001);
            assert_eq!(w.len(), 1);
        }
    }

    #[test]
    fn test_spawn_narrow_field_centers() {
        let mut state = GameState::new(GameConfig {
            field_width: 150.0,
            ..Default::default()
        });
        state.spawn_word();
        assert_eq!(state.words[0].pos.x, 75.0);
    }

    #[test]
    fn test_remove_word_clears_target() {
        let mut state = GameState::new(GameConfig::default());
        let a = state.push_word("code", Vec2::new(100.0, 10.0), 0.0);
        let b = state.push_word("data", Vec2::new(200.0, 10.0), 0.0);
        state.target = Some(b);

        state.remove_word(0);
        assert_eq!(state.target, Some(b));
        assert_eq!(state.target_index(), Some(0));

        state.remove_word(0);
        assert_eq!(state.target, None);
        assert!(state.word_index(a).is_none());
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let config = GameConfig {
            seed: 99999,
            ..Default::default()
        };
        let mut s1 = GameState::new(config.clone());
        let mut s2 = GameState::new(config);
        for _ in 0..20 {
            s1.spawn_word();
            s2.spawn_word();
        }
        for (a, b) in s1.words.iter().zip(&s2.words) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.speed, b.speed);
        }
    }

    #[test]
    fn test_wpm() {
        let mut state = GameState::new(GameConfig::default());
        assert_eq!(state.wpm(), 0);
        state.words_cleared = 15;
        state.elapsed = 30.0;
        assert_eq!(state.wpm(), 30);
        state.elapsed = 40.0;
        assert_eq!(state.wpm(), 22);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::new(GameConfig::default());
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);
        state.phase = GamePhase::GameOver;
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::GameOver);
    }
}
