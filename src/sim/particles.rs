//! Cosmetic particles
//!
//! Bursts are spawned by word hits, completions and expiries. They drift in a
//! straight line and fade out; gameplay never looks at them.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle, ParticleKind};
use crate::consts::*;

/// Spawn up to `count` particles at `at`, respecting the session's particle cap
pub fn emit(state: &mut GameState, at: Vec2, kind: ParticleKind, count: usize) {
    let room = state
        .config
        .max_particles
        .saturating_sub(state.particles.len());

    for _ in 0..count.min(room) {
        let vx = (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD;
        let vy = (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD;
        state.particles.push(Particle {
            pos: at,
            vel: Vec2::new(vx, vy) * FRAME_RATE,
            kind,
            life: 1.0,
        });
    }
}

/// Move and fade particles, dropping the dead ones
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    let decay = PARTICLE_DECAY * FRAME_RATE * dt;
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.life -= decay;
    }
    particles.retain(|p| p.life > 0.0);
}
