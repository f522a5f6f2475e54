//! Collectible power-ups

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{DepthScale, Rect, overlaps};
use crate::consts::*;
use crate::{frame_scale, palette};

pub const POWERUP_BASE_SIZE: f32 = 20.0;
/// Fixed fall speed per nominal frame (not wave-scaled)
pub const POWERUP_SPEED: f32 = 2.0;
/// Lane the power-ups roll down
pub const POWERUP_LANE_X: f32 = 345.0;
/// Power-ups past this line are lost
pub const POWERUP_DESPAWN_Y: f32 = 600.0;
pub const POWERUP_DEPTH_SCALE: DepthScale = DepthScale::new(0.3, 1.2);
/// Ammo granted by an ammo pickup
pub const AMMO_PICKUP: u32 = 15;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Ammo,
    Power,
    FireRate,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Ammo, PowerUpKind::Power, PowerUpKind::FireRate];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Arithmetic glyph shown on the pickup
    pub fn symbol(self) -> char {
        match self {
            PowerUpKind::Ammo => '+',
            PowerUpKind::Power => '×',
            PowerUpKind::FireRate => '÷',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(PowerUpKind::Ammo),
            '×' | 'x' | '*' => Some(PowerUpKind::Power),
            '÷' | '/' => Some(PowerUpKind::FireRate),
            _ => None,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::Ammo => palette::AMMO,
            PowerUpKind::Power => palette::POWER,
            PowerUpKind::FireRate => palette::FIRE_RATE,
        }
    }

    /// Apply the pickup to the player's stats, returning the notification text
    pub fn apply(self, stats: &mut Loadout) -> &'static str {
        match self {
            PowerUpKind::Ammo => {
                stats.ammo = (stats.ammo + AMMO_PICKUP).min(stats.max_ammo);
                "AMMO +15"
            }
            PowerUpKind::Power => {
                stats.power = (stats.power + 1).min(MAX_POWER);
                "POWER +1"
            }
            PowerUpKind::FireRate => {
                stats.fire_rate = (stats.fire_rate + 1).min(MAX_FIRE_RATE);
                "FIRE RATE +1"
            }
        }
    }
}

/// The weapon stats a power-up can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub ammo: u32,
    pub max_ammo: u32,
    /// Bullet damage
    pub power: u32,
    pub fire_rate: u32,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            ammo: START_AMMO,
            max_ammo: MAX_AMMO,
            power: START_POWER,
            fire_rate: START_FIRE_RATE,
        }
    }
}

impl Loadout {
    /// Milliseconds between automatic shots
    pub fn fire_interval_ms(&self) -> f64 {
        (FIRE_INTERVAL_BASE_MS - self.fire_rate as f64 * FIRE_INTERVAL_STEP_MS)
            .max(FIRE_INTERVAL_MIN_MS)
    }

    /// Bullets fired per shot
    pub fn bullets_per_shot(&self) -> u32 {
        (self.power / 3 + 1).min(MAX_BULLETS_PER_SHOT)
    }
}

/// Lifecycle of a power-up; the first exit wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpState {
    Falling,
    Collected,
    Missed,
}

/// A power-up entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub state: PowerUpState,
    pub anim_frame: u32,
    /// Size pulse (rendering only)
    pub pulse: f32,
    pub bob_offset: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, bob_offset: f32) -> Self {
        let scale = POWERUP_DEPTH_SCALE.at(SPAWN_LINE_Y);
        Self {
            id,
            kind,
            pos: Vec2::new(POWERUP_LANE_X, SPAWN_LINE_Y),
            size: Vec2::splat(POWERUP_BASE_SIZE * scale),
            speed: POWERUP_SPEED,
            state: PowerUpState::Falling,
            anim_frame: 0,
            pulse: 1.0,
            bob_offset,
        }
    }

    pub fn spawn<R: Rng>(id: u32, rng: &mut R) -> Self {
        let kind = PowerUpKind::random(rng);
        Self::new(id, kind, rng.random::<f32>() * std::f32::consts::TAU)
    }

    pub fn is_active(&self) -> bool {
        self.state == PowerUpState::Falling
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn update(&mut self, dt_ms: f32) {
        if !self.is_active() {
            return;
        }
        self.pos.y += self.speed * frame_scale(dt_ms);
        self.anim_frame = self.anim_frame.wrapping_add(1);
        self.pulse = (self.anim_frame as f32 * 0.1).sin() * 0.2 + 1.0;

        let scale = POWERUP_DEPTH_SCALE.at(self.pos.y);
        self.size = Vec2::splat(POWERUP_BASE_SIZE * scale);

        if self.pos.y > POWERUP_DESPAWN_Y {
            self.state = PowerUpState::Missed;
        }
    }

    pub fn check_collision(&self, player: &Rect) -> bool {
        self.is_active() && overlaps(&self.rect(), player)
    }

    /// Mark as picked up. Returns false if it already left play.
    pub fn collect(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = PowerUpState::Collected;
        true
    }
}
