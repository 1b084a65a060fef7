//! Game settings and preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;
use crate::platform::Storage;
use crate::sim::{GameConfig, RuleSet};
use crate::words::WordPool;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Scoring/leveling rules for new games
    pub rules: RuleSet,
    /// Arcade ramp or a fixed practice pool
    pub pool: WordPool,

    // === Visual Effects ===
    /// Screen shake when a word hits the floor
    pub screen_shake: bool,
    /// Red flash on mistakes
    pub error_flash: bool,
    /// Particle effects
    pub particles: bool,
    /// "LEVEL N" banner
    pub level_banner: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    /// Reduced motion (no shake or flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: RuleSet::Tiered,
            pool: WordPool::Arcade,

            // Visual effects - all on by default
            screen_shake: true,
            error_flash: true,
            particles: true,
            level_banner: true,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective error flash (respects reduced_motion)
    pub fn effective_error_flash(&self) -> bool {
        self.error_flash && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles { 0 } else { MAX_PARTICLES }
    }

    /// Session config for a field of the given size
    pub fn game_config(&self, field_width: f32, field_height: f32, seed: u64) -> GameConfig {
        GameConfig {
            rules: self.rules,
            pool: self.pool,
            field_width,
            field_height,
            seed,
            max_particles: self.max_particles(),
        }
    }

    /// Take the mode picked on the start screen. Unknown names keep the
    /// current value; a change is saved right away.
    pub fn choose_mode(&mut self, rules: &str, pool: &str, storage: &mut dyn Storage) {
        let rules = RuleSet::from_str(rules).unwrap_or(self.rules);
        let pool = WordPool::from_str(pool).unwrap_or(self.pool);
        if (rules, pool) != (self.rules, self.pool) {
            self.rules = rules;
            self.pool = pool;
            log::info!("Mode: {} rules, {} words", rules.as_str(), pool.as_str());
            self.save(storage);
        }
    }

    /// Storage key
    pub const STORAGE_KEY: &'static str = "code_rain_settings";

    /// Load settings from storage, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        if let Some(json) = storage.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
                    settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
                    log::info!("Loaded settings from storage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage
    pub fn save(&self, storage: &mut dyn Storage) {
        if let Ok(json) = serde_json::to_string(self) {
            if storage.set(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}
