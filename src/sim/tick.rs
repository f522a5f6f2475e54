//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one frame of `dt_ms`
//! milliseconds. Step order is fixed so runs replay identically.

use glam::Vec2;
use rand::Rng;

use super::bullet::Bullet;
use super::collision::resolve_collisions;
use super::enemy::{EnemyEvent, EnemyKind};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Pause toggle (edge, not held)
    pub pause: bool,
    /// Restart request; honored only after game over
    pub restart: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if input.restart && state.phase == GamePhase::GameOver {
        state.restart();
        return;
    }

    if input.pause {
        state.toggle_pause();
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = dt_ms.max(0.0);
    state.elapsed_ms += dt as f64;

    advance_clocks(state);
    state.player.update(input.left, input.right, dt);
    auto_fire(state);
    spawn_enemies(state);
    spawn_power_ups(state);
    advance_entities(state, dt);
    // A fatal leak freezes the run: nothing scores after game over
    if state.phase != GamePhase::Playing {
        return;
    }
    resolve_collisions(state);
}

/// Wave timer, difficulty ramp and ammo regeneration
fn advance_clocks(state: &mut GameState) {
    state.wave_timer += 1;
    state.frame_count += 1;

    if state.elapsed_ms - state.timers.last_difficulty_ms >= DIFFICULTY_INTERVAL_MS {
        state.timers.last_difficulty_ms += DIFFICULTY_INTERVAL_MS;
        state.difficulty += DIFFICULTY_STEP;
        log::info!("Difficulty increased to {:.1}", state.difficulty);
        state.events.push(GameEvent::DifficultyIncreased {
            difficulty: state.difficulty,
        });
    }

    if state.wave_timer >= WAVE_TICKS {
        state.wave += 1;
        state.wave_timer = 0;
        log::info!("Wave {} begins", state.wave);
        state.events.push(GameEvent::WaveStarted { wave: state.wave });
    }

    if state.elapsed_ms - state.timers.last_ammo_regen_ms >= AMMO_REGEN_INTERVAL_MS {
        state.timers.last_ammo_regen_ms += AMMO_REGEN_INTERVAL_MS;
        let loadout = &mut state.loadout;
        if loadout.ammo < loadout.max_ammo {
            loadout.ammo += 1;
            state.events.push(GameEvent::AmmoRegenerated { ammo: loadout.ammo });
        }
    }
}

/// Fire when the interval has elapsed and there is ammo
fn auto_fire(state: &mut GameState) {
    let interval = state.loadout.fire_interval_ms();
    let ready = state
        .timers
        .last_shot_ms
        .is_none_or(|last| state.elapsed_ms - last >= interval);
    if ready && state.loadout.ammo > 0 {
        shoot(state);
        state.timers.last_shot_ms = Some(state.elapsed_ms);
    }
}

/// Spawn a volley centered on the player. Costs one ammo regardless of size.
pub fn shoot(state: &mut GameState) {
    if state.loadout.ammo == 0 {
        return;
    }
    let count = state.loadout.bullets_per_shot();
    let spread = (count - 1) as f32 * BULLET_SPREAD;
    let half = (count - 1) as f32 / 2.0;
    let base_x = state.player.center_x() - super::bullet::BULLET_WIDTH / 2.0;

    for i in 0..count {
        let offset = (i as f32 - half) * spread;
        state.bullets.push(Bullet::new(
            Vec2::new(base_x + offset, state.player.pos.y),
            state.loadout.power,
        ));
    }

    state.loadout.ammo -= 1;
    state.events.push(GameEvent::ShotFired { bullets: count });
}

/// Per-tick enemy spawn chance at the current wave and difficulty
pub fn enemy_spawn_chance(wave: u32, difficulty: f32) -> f32 {
    (ENEMY_SPAWN_BASE + wave as f32 * ENEMY_SPAWN_WAVE_COEFF).min(ENEMY_SPAWN_CAP) * difficulty
}

/// Chance that a spawned enemy is strong (or better)
pub fn strong_chance(wave: u32) -> f32 {
    (STRONG_CHANCE_BASE + wave as f32 * STRONG_CHANCE_WAVE_COEFF).min(STRONG_CHANCE_CAP)
}

fn spawn_enemies(state: &mut GameState) {
    let chance = enemy_spawn_chance(state.wave, state.difficulty);
    if state.rng.random::<f32>() >= chance {
        return;
    }
    let kind = roll_enemy_kind(state);
    state.spawn_enemy(kind);
}

fn roll_enemy_kind(state: &mut GameState) -> EnemyKind {
    if state.rng.random::<f32>() >= strong_chance(state.wave) {
        return EnemyKind::Normal;
    }
    if state.wave >= ANCIENT_MIN_WAVE && state.rng.random::<f32>() < ANCIENT_UPGRADE_CHANCE {
        EnemyKind::Ancient
    } else {
        EnemyKind::Strong
    }
}

/// One roll every POWERUP_INTERVAL_MS of play
fn spawn_power_ups(state: &mut GameState) {
    if state.elapsed_ms - state.timers.last_powerup_roll_ms < POWERUP_INTERVAL_MS {
        return;
    }
    state.timers.last_powerup_roll_ms += POWERUP_INTERVAL_MS;
    if state.rng.random::<f32>() < POWERUP_SPAWN_CHANCE {
        state.spawn_power_up();
    }
}

/// Move everything, apply leaks, then drop whatever left play
fn advance_entities(state: &mut GameState, dt: f32) {
    for bullet in state.bullets.iter_mut() {
        bullet.update(dt);
    }

    let mut leaks = Vec::new();
    for enemy in state.enemies.iter_mut() {
        if let Some(EnemyEvent::Leaked { kind, damage }) = enemy.update(dt) {
            log::debug!("{} enemy #{} leaked for {} damage", kind.as_str(), enemy.id, damage);
            leaks.push((kind, damage));
        }
    }
    for (kind, damage) in leaks {
        state.events.push(GameEvent::EnemyLeaked { kind, damage });
        state.damage_player(damage);
    }

    for particle in state.particles.iter_mut() {
        particle.update(dt);
    }
    for power_up in state.power_ups.iter_mut() {
        power_up.update(dt);
    }

    state.bullets.retain(|b| b.active);
    state.enemies.retain(|e| e.is_active());
    state.particles.retain(|p| p.active);
    state.power_ups.retain(|p| p.is_active());
}
