//! Read-only snapshot of a session for the render sink

use super::rules::RuleSet;
use super::state::{GamePhase, GameState, Particle};

/// One word as the renderer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct WordView<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub matched: usize,
    pub targeted: bool,
}

impl WordView<'_> {
    /// Already-typed prefix and the rest of the word
    pub fn split(&self) -> (&str, &str) {
        let at = self
            .text
            .char_indices()
            .nth(self.matched)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        self.text.split_at(at)
    }
}

/// Heads-up display numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub rules: RuleSet,
    pub score: u64,
    pub level: u32,
    pub level_score: u64,
    pub level_target: Option<u64>,
    /// Never negative
    pub time_remaining: f32,
    pub wpm: u32,
    pub words_cleared: u32,
}

impl Hud {
    /// Whole seconds for display, rounded up
    pub fn seconds_left(&self) -> u32 {
        self.time_remaining.ceil() as u32
    }

    pub fn time_warning(&self) -> bool {
        self.time_remaining <= 10.0
    }

    /// True once the tiered target for this level is reached
    pub fn goal_met(&self) -> bool {
        self.level_target.is_some_and(|t| self.level_score >= t)
    }

    /// "12 / 28" style goal text (tiered only)
    pub fn goal_text(&self) -> Option<String> {
        self.level_target
            .map(|t| format!("{} / {}", self.level_score, t))
    }
}

/// Everything the render sink needs for one frame
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub field_width: f32,
    pub field_height: f32,
    pub words: Vec<WordView<'a>>,
    pub particles: &'a [Particle],
    pub hud: Hud,
}

impl<'a> FrameView<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        let words = state
            .words
            .iter()
            .map(|w| WordView {
                text: w.text,
                x: w.pos.x,
                y: w.pos.y,
                matched: w.matched,
                targeted: state.target == Some(w.id),
            })
            .collect();

        Self {
            phase: state.phase,
            field_width: state.config.field_width,
            field_height: state.config.field_height,
            words,
            particles: &state.particles,
            hud: Hud {
                rules: state.rules(),
                score: state.score,
                level: state.level,
                level_score: state.level_score,
                level_target: state.level_target,
                time_remaining: state.time_remaining.max(0.0),
                wpm: state.wpm(),
                words_cleared: state.words_cleared,
            },
        }
    }

    pub fn target(&self) -> Option<&WordView<'a>> {
        self.words.iter().find(|w| w.targeted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameConfig;
    use glam::Vec2;

    #[test]
    fn test_capture_marks_target() {
        let mut state = GameState::new(GameConfig::default());
        state.push_word("code", Vec2::new(100.0, 50.0), 0.0);
        let id = state.push_word("data", Vec2::new(300.0, 80.0), 0.0);
        state.target = Some(id);
        state.words[1].matched = 2;

        let view = FrameView::capture(&state);
        assert_eq!(view.words.len(), 2);
        assert!(!view.words[0].targeted);
        let target = view.target().unwrap();
        assert_eq!(target.text, "data");
        assert_eq!(target.split(), ("da", "ta"));
    }

    #[test]
    fn test_hud_clamps_timer() {
        let mut state = GameState::new(GameConfig::default());
        state.time_remaining = -2.5;
        let view = FrameView::capture(&state);
        assert_eq!(view.hud.time_remaining, 0.0);
        assert_eq!(view.hud.seconds_left(), 0);
        assert!(view.hud.time_warning());
    }

    #[test]
    fn test_hud_goal() {
        let mut state = GameState::new(GameConfig::default());
        state.level_score = 5;
        let hud = FrameView::capture(&state).hud;
        assert_eq!(hud.goal_text().as_deref(), Some("5 / 12"));
        assert!(!hud.goal_met());

        state.level_score = 12;
        assert!(FrameView::capture(&state).hud.goal_met());

        let state = GameState::new(GameConfig {
            rules: RuleSet::Continuous,
            ..Default::default()
        });
        let hud = FrameView::capture(&state).hud;
        assert_eq!(hud.goal_text(), None);
        assert!(!hud.goal_met());
        assert_eq!(hud.seconds_left(), 60);
    }

    #[test]
    fn test_hud_mode_and_word_count() {
        let mut state = GameState::new(GameConfig {
            rules: RuleSet::Continuous,
            ..Default::default()
        });
        state.words_cleared = 7;
        let view = FrameView::capture(&state);
        assert_eq!(view.phase, GamePhase::Playing);
        assert_eq!(view.hud.rules.as_str(), "Continuous");
        assert_eq!(view.hud.words_cleared, 7);
        assert!(view.target().is_none());
    }
}
