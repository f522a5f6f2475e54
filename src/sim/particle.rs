//! Cosmetic debris
//!
//! Particles have no gameplay effect. Entities request bursts through
//! [`ParticleBurst`]; the game state turns them into particles with its RNG.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::frame_scale;

/// Downward acceleration per nominal frame
pub const PARTICLE_GRAVITY: f32 = 0.1;
/// Default particle cap (settings may lower it)
pub const MAX_PARTICLES: usize = 512;

/// A request to emit a cloud of particles at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub pos: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    pub count: u32,
    /// When above 1, each base particle gets `size` jittered companions
    pub size: u32,
}

impl ParticleBurst {
    pub fn new(pos: Vec2, color: u32, count: u32, size: u32) -> Self {
        Self {
            pos,
            color,
            count,
            size,
        }
    }

    /// Number of particles this burst produces
    pub fn particle_count(&self) -> usize {
        let per_base = if self.size > 1 { 1 + self.size } else { 1 };
        (self.count * per_base) as usize
    }

    /// Materialize the burst
    pub fn emit<R: Rng>(&self, rng: &mut R) -> Vec<Particle> {
        let mut particles = Vec::with_capacity(self.particle_count());
        for _ in 0..self.count {
            particles.push(Particle::spawn(rng, self.pos, self.color));
            if self.size > 1 {
                for _ in 0..self.size {
                    let jitter = Vec2::new(
                        (rng.random::<f32>() - 0.5) * 10.0,
                        (rng.random::<f32>() - 0.5) * 10.0,
                    );
                    particles.push(Particle::spawn(rng, self.pos + jitter, self.color));
                }
            }
        }
        particles
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub size: f32,
    /// Remaining life in nominal frames
    pub life: f32,
    pub max_life: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub active: bool,
}

impl Particle {
    pub fn spawn<R: Rng>(rng: &mut R, pos: Vec2, color: u32) -> Self {
        let life = 30.0 + rng.random::<f32>() * 20.0;
        Self {
            pos,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 10.0,
                (rng.random::<f32>() - 0.5) * 10.0,
            ),
            color,
            size: rng.random::<f32>() * 5.0 + 2.0,
            life,
            max_life: life,
            rotation: rng.random::<f32>() * std::f32::consts::TAU,
            rotation_speed: (rng.random::<f32>() - 0.5) * 0.2,
            active: true,
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        if !self.active {
            return;
        }
        let k = frame_scale(dt_ms);
        self.pos += self.vel * k;
        self.vel.y += PARTICLE_GRAVITY * k;
        self.life -= k;
        self.rotation += self.rotation_speed * k;

        if self.life <= 0.0 {
            self.active = false;
        }
    }

    /// Fade factor for rendering
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}
