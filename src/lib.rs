//! Code Rain - A falling-words arcade typing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (word lifecycle, input matching, scoring)
//! - `words`: Tiered word bank and spawn selection
//! - `fx`: Cosmetic screen effects (flash, shake, level banner)
//! - `highscores`: Top-10 leaderboard
//! - `settings`: Persisted player preferences
//! - `platform`: Storage and clock abstraction
//! - `renderer` / `audio`: Canvas2D drawing and Web Audio tones (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod fx;
pub mod highscores;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod words;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the frame rate word speeds are tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frames per second that per-frame tuning values are expressed in
    pub const FRAME_RATE: f32 = 60.0;

    /// Seconds on the clock per level (tiered) or per session (continuous)
    pub const TIME_BUDGET: f32 = 60.0;

    /// Words spawn just above the visible field
    pub const SPAWN_Y: f32 = -30.0;
    /// Horizontal keep-out at each side of the field
    pub const SPAWN_MARGIN: f32 = 100.0;
    /// Random speed factor range applied to the level's base speed
    pub const SPEED_JITTER_MIN: f32 = 0.8;
    pub const SPEED_JITTER_MAX: f32 = 1.3;

    /// Particles per completion/expiry burst
    pub const BURST_PARTICLES: usize = 20;
    /// Particles per correctly typed letter
    pub const HIT_PARTICLES: usize = 2;
    /// Approximate advance per typed glyph, for placing hit sparks
    pub const GLYPH_ADVANCE: f32 = 15.0;
    /// Max particle speed per frame on each axis (±half)
    pub const PARTICLE_SPREAD: f32 = 5.0;
    /// Particle life lost per frame
    pub const PARTICLE_DECAY: f32 = 0.05;
    /// Default particle cap
    pub const MAX_PARTICLES: usize = 512;
}
