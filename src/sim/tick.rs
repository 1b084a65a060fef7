//! Simulation tick
//!
//! Core game loop that advances the session by one timestep.

use super::input::handle_key;
use super::particles;
use super::rules;
use super::state::{GamePhase, GameState};

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Typed characters in arrival order
    pub keys: Vec<char>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Keys typed before a pause request still land
    if state.phase == GamePhase::Playing {
        for &key in &input.keys {
            handle_key(state, key);
        }
    }

    if input.pause {
        state.toggle_pause();
    }

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver => {
            // Let the last bursts finish
            particles::update(&mut state.particles, dt);
            return;
        }
        GamePhase::Playing => {}
    }

    state.elapsed += dt;
    state.time_remaining -= dt;

    if state.time_remaining <= 0.0 {
        rules::timer_expired(state);
        return;
    }

    // Spawning
    state.spawn_timer_ms += dt * 1000.0;
    if state.spawn_timer_ms > state.rules().spawn_interval_ms(state.level) {
        state.spawn_word();
        state.spawn_timer_ms = 0.0;
    }

    // Fall, newest first so removal doesn't disturb the rest of the walk
    let floor = state.config.field_height;
    for i in (0..state.words.len()).rev() {
        state.words[i].fall(dt);
        if state.words[i].pos.y > floor {
            rules::expire_word(state, i);
        }
    }

    particles::update(&mut state.particles, dt);
}
