//! Highway Shooter - a perspective-highway arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `renderer`: Surface-agnostic scene drawing
//! - `platform`: Key input mapping
//! - `audio`: Sound effect surface
//! - `ui`: Notification and HUD sync surface
//! - `settings`: Player preferences (JSON)
//! - `app`: Frame driver tying the simulation to its collaborators

pub mod app;
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::App;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal frame length in milliseconds; motion constants are "per 16ms"
    pub const FRAME_MS: f32 = 16.0;

    /// Play area (canvas) dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Enemies and power-ups enter on the spawn line...
    pub const SPAWN_LINE_Y: f32 = 230.0;
    pub const SPAWN_LINE_X_MIN: f32 = 395.0;
    pub const SPAWN_LINE_X_MAX: f32 = 490.0;
    /// ...and head for the end line near the player
    pub const END_LINE_Y: f32 = 550.0;
    pub const END_LINE_X_MIN: f32 = 400.0;
    pub const END_LINE_X_MAX: f32 = 650.0;
    /// How far past the end line an enemy travels before it leaks
    pub const LEAK_MARGIN: f32 = 50.0;

    /// Depth scale ramps linearly across this y range
    pub const DEPTH_SCALE_MIN_Y: f32 = 200.0;
    pub const DEPTH_SCALE_MAX_Y: f32 = 550.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_Y: f32 = 550.0;
    pub const PLAYER_SIZE: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_MIN_X: f32 = 100.0;
    pub const PLAYER_MAX_X: f32 = 650.0;

    /// Starting player stats
    pub const START_HEALTH: i32 = 100;
    pub const START_AMMO: u32 = 20;
    pub const MAX_AMMO: u32 = 50;
    pub const START_POWER: u32 = 1;
    pub const MAX_POWER: u32 = 10;
    pub const START_FIRE_RATE: u32 = 1;
    pub const MAX_FIRE_RATE: u32 = 10;

    /// Auto-fire interval: max(MIN, BASE - fire_rate * STEP) ms
    pub const FIRE_INTERVAL_BASE_MS: f64 = 600.0;
    pub const FIRE_INTERVAL_STEP_MS: f64 = 50.0;
    pub const FIRE_INTERVAL_MIN_MS: f64 = 50.0;
    /// Horizontal spacing step between simultaneous bullets
    pub const BULLET_SPREAD: f32 = 5.0;
    pub const MAX_BULLETS_PER_SHOT: u32 = 3;

    /// Waves advance every WAVE_TICKS simulation ticks (~20s at 60fps)
    pub const WAVE_TICKS: u32 = 1200;
    /// Difficulty ramps by DIFFICULTY_STEP every DIFFICULTY_INTERVAL_MS
    pub const DIFFICULTY_INTERVAL_MS: f64 = 30_000.0;
    pub const DIFFICULTY_STEP: f32 = 0.1;
    /// One ammo regenerates every AMMO_REGEN_INTERVAL_MS
    pub const AMMO_REGEN_INTERVAL_MS: f64 = 1_000.0;

    /// Enemy spawn chance per tick: min(CAP, BASE + wave * WAVE_COEFF) * difficulty
    pub const ENEMY_SPAWN_BASE: f32 = 0.006;
    pub const ENEMY_SPAWN_WAVE_COEFF: f32 = 0.002;
    pub const ENEMY_SPAWN_CAP: f32 = f32::INFINITY;
    /// Strong enemy chance: min(STRONG_CAP, STRONG_BASE + wave * STRONG_WAVE_COEFF)
    pub const STRONG_CHANCE_BASE: f32 = 0.05;
    pub const STRONG_CHANCE_WAVE_COEFF: f32 = 0.01;
    pub const STRONG_CHANCE_CAP: f32 = 0.2;
    /// From this wave on, a strong roll may be upgraded to an ancient enemy
    pub const ANCIENT_MIN_WAVE: u32 = 6;
    pub const ANCIENT_UPGRADE_CHANCE: f32 = 0.25;

    /// Power-ups get a spawn roll every POWERUP_INTERVAL_MS of play
    pub const POWERUP_INTERVAL_MS: f64 = 5_000.0;
    pub const POWERUP_SPAWN_CHANCE: f32 = 0.35;

    /// Combo window and ceiling
    pub const COMBO_WINDOW_MS: f64 = 1_000.0;
    pub const COMBO_STEP: f32 = 0.5;
    pub const COMBO_MAX: f32 = 5.0;

    /// Particle bursts
    pub const HIT_BURST_COUNT: u32 = 8;
    pub const KILL_BURST_COUNT: u32 = 20;
    pub const KILL_BURST_SIZE: u32 = 2;
    pub const PICKUP_BURST_COUNT: u32 = 15;
}

/// Colors (0xRRGGBB) shared by the simulation's particle bursts and the renderer
pub mod palette {
    pub const GOLD: u32 = 0xFFD700;
    pub const NORMAL_ENEMY: u32 = 0xFF9933;
    pub const STRONG_ENEMY: u32 = 0xFF3355;
    pub const ANCIENT_ENEMY: u32 = 0x9966FF;
    pub const AMMO: u32 = 0x4169E1;
    pub const POWER: u32 = 0xFFD700;
    pub const FIRE_RATE: u32 = 0xFF69B4;
    pub const BULLET: u32 = 0xFF8C1A;
    pub const PLAYER: u32 = 0x3498DB;
    pub const SKY: u32 = 0xE67E22;
    pub const SAND: u32 = 0xEDBB99;
    pub const ROAD: u32 = 0x34495E;
    pub const HEALTH_BACK: u32 = 0x330000;
    pub const HEALTH_GOOD: u32 = 0x00FF00;
    pub const HEALTH_MID: u32 = 0xFFA500;
    pub const HEALTH_LOW: u32 = 0xFF0000;
    pub const FLASH: u32 = 0xFF6464;
    pub const WHITE: u32 = 0xFFFFFF;
}

/// Convert a frame's wall-clock delta (ms) into nominal 16ms frames
#[inline]
pub fn frame_scale(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_scale_nominal() {
        assert_eq!(frame_scale(16.0), 1.0);
        assert_eq!(frame_scale(32.0), 2.0);
        assert_eq!(frame_scale(0.0), 0.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    }
}
