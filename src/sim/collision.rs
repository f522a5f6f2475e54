//! Collision resolution and scoring
//!
//! Bullets are resolved in collection order; each bullet hits at most one
//! enemy per tick (the first overlapping live enemy). An enemy can take
//! several bullets in the same tick until one of them kills it.

use super::geometry::overlaps;
use super::particle::ParticleBurst;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::palette;

/// Resolve bullet/enemy hits, then player/power-up pickups
pub fn resolve_collisions(state: &mut GameState) {
    resolve_bullet_hits(state);
    resolve_pickups(state);
}

fn resolve_bullet_hits(state: &mut GameState) {
    let mut bursts: Vec<ParticleBurst> = Vec::new();

    for bullet in state.bullets.iter_mut() {
        if !bullet.active {
            continue;
        }
        let bullet_rect = bullet.rect();

        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.is_active() && overlaps(&bullet_rect, &e.rect()))
        else {
            continue;
        };

        let killed = enemy.take_damage(bullet.power);
        bullet.active = false;
        bursts.push(ParticleBurst::new(
            bullet_rect.center(),
            palette::GOLD,
            HIT_BURST_COUNT,
            1,
        ));
        state.events.push(GameEvent::EnemyHit {
            kind: enemy.kind,
            pos: bullet_rect.center(),
        });

        if killed {
            let combo = state.combo.register_kill(state.elapsed_ms);
            let points = state.combo.points(enemy.kind.base_points());
            state.score += points;
            state.enemies_defeated += 1;
            log::debug!(
                "Killed {} enemy #{} for {} points (x{:.1})",
                enemy.kind.as_str(),
                enemy.id,
                points,
                combo
            );
            bursts.push(ParticleBurst::new(
                enemy.rect().center(),
                enemy.kind.color(),
                KILL_BURST_COUNT,
                KILL_BURST_SIZE,
            ));
            state.events.push(GameEvent::EnemyKilled {
                kind: enemy.kind,
                points,
                combo,
            });
        }
    }

    state.bullets.retain(|b| b.active);
    state.enemies.retain(|e| e.is_active());
    for burst in bursts {
        state.emit_particles(burst);
    }
}

fn resolve_pickups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut bursts: Vec<ParticleBurst> = Vec::new();

    for power_up in state.power_ups.iter_mut() {
        if !power_up.check_collision(&player_rect) || !power_up.collect() {
            continue;
        }
        let message = power_up.kind.apply(&mut state.loadout);
        log::debug!("Collected {:?}: {}", power_up.kind, message);
        bursts.push(ParticleBurst::new(
            power_up.rect().center(),
            power_up.kind.color(),
            PICKUP_BURST_COUNT,
            1,
        ));
        state.events.push(GameEvent::PowerUpCollected {
            kind: power_up.kind,
            message: message.to_string(),
        });
    }

    state.power_ups.retain(|p| p.is_active());
    for burst in bursts {
        state.emit_particles(burst);
    }
}
