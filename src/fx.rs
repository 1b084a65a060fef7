//! Screen effects
//!
//! Short-lived cosmetic timers kicked off by game events: the red error
//! flash, screen shake and the "LEVEL N" banner. They run on the host's frame
//! clock and the simulation never reads them.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Seconds the error flash stays up
pub const FLASH_DURATION: f32 = 0.1;
/// Seconds of shake after a word hits the floor
pub const SHAKE_DURATION: f32 = 0.1;
/// Max shake offset in pixels (±half)
pub const SHAKE_MAGNITUDE: f32 = 10.0;
/// Banner hold time, then fade
pub const BANNER_HOLD: f32 = 1.5;
pub const BANNER_FADE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelBanner {
    pub level: u32,
    /// Seconds since it appeared
    pub age: f32,
}

impl LevelBanner {
    /// 0 → 1 over the first fade, hold, then back to 0
    pub fn alpha(&self) -> f32 {
        if self.age < BANNER_FADE {
            self.age / BANNER_FADE
        } else if self.age < BANNER_HOLD {
            1.0
        } else {
            (1.0 - (self.age - BANNER_HOLD) / BANNER_FADE).max(0.0)
        }
    }

    /// Grows from 1.0 to 1.5 over its lifetime
    pub fn scale(&self) -> f32 {
        1.0 + 0.5 * (self.age / (BANNER_HOLD + BANNER_FADE)).min(1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScreenFx {
    flash: f32,
    shake: f32,
    banner: Option<LevelBanner>,
}

impl ScreenFx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start whatever effect this event calls for
    pub fn trigger(&mut self, event: &GameEvent, settings: &Settings) {
        match event {
            GameEvent::Miss => {
                if settings.effective_error_flash() {
                    self.flash = FLASH_DURATION;
                }
            }
            GameEvent::WordExpired { .. } => {
                if settings.effective_error_flash() {
                    self.flash = FLASH_DURATION;
                }
                if settings.effective_screen_shake() {
                    self.shake = SHAKE_DURATION;
                }
            }
            GameEvent::LevelUp { level } => {
                if settings.level_banner {
                    self.banner = Some(LevelBanner {
                        level: *level,
                        age: 0.0,
                    });
                }
            }
            _ => {}
        }
    }

    /// Advance timers by real elapsed time
    pub fn update(&mut self, dt: f32) {
        self.flash = (self.flash - dt).max(0.0);
        self.shake = (self.shake - dt).max(0.0);
        if let Some(banner) = &mut self.banner {
            banner.age += dt;
            if banner.age >= BANNER_HOLD + BANNER_FADE {
                self.banner = None;
            }
        }
    }

    pub fn flashing(&self) -> bool {
        self.flash > 0.0
    }

    pub fn shaking(&self) -> bool {
        self.shake > 0.0
    }

    pub fn banner(&self) -> Option<LevelBanner> {
        self.banner
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
