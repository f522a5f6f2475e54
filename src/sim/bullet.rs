//! Player projectiles

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::frame_scale;

pub const BULLET_WIDTH: f32 = 8.0;
pub const BULLET_HEIGHT: f32 = 20.0;
/// Upward travel per nominal frame
pub const BULLET_SPEED: f32 = 15.0;
/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 10;

/// A bullet travelling straight up the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Damage dealt on hit
    pub power: u32,
    pub active: bool,
    /// Tail positions, oldest first
    pub trail: VecDeque<Vec2>,
    /// Trail hue in degrees, cycles each tick
    pub hue: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, power: u32) -> Self {
        Self {
            pos,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed: BULLET_SPEED,
            power,
            active: true,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            hue: 25.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Where the trail attaches: bottom center
    pub fn tail(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    pub fn update(&mut self, dt_ms: f32) {
        if !self.active {
            return;
        }

        self.trail.push_back(self.tail());
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }

        self.pos.y -= self.speed * frame_scale(dt_ms);
        self.hue = (self.hue + 2.0) % 360.0;

        if self.pos.y < 0.0 {
            self.active = false;
        }
    }
}
