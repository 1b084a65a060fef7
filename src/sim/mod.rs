//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (words kept in spawn order, targets held by ID)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod events;
pub mod input;
pub mod particles;
pub mod rules;
pub mod state;
pub mod tick;
pub mod view;

pub use autoplay::AutoPlayer;
pub use events::{GameEvent, SessionSummary, SoundEffect};
pub use input::{KeyOutcome, handle_key};
pub use rules::RuleSet;
pub use state::{GameConfig, GamePhase, GameState, Particle, ParticleKind, Word};
pub use tick::{TickInput, tick};
pub use view::{FrameView, Hud, WordView};
