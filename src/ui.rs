//! Notification and UI-sync surfaces
//!
//! The host owns the actual on-screen text. The game pushes short messages
//! ("WAVE 3!", "POWER +1") and a stats snapshot whenever a displayed stat
//! changes. Both calls are fire-and-forget.

use serde::Serialize;

use crate::sim::{GameEvent, GamePhase, GameState};

/// Everything the HUD displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudStats {
    pub score: u64,
    pub health: i32,
    pub max_health: i32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub power: u32,
    pub fire_rate: u32,
    pub wave: u32,
    pub combo: f32,
    pub enemies_defeated: u32,
    pub phase: GamePhase,
}

impl HudStats {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            health: state.health.max(0),
            max_health: state.max_health,
            ammo: state.loadout.ammo,
            max_ammo: state.loadout.max_ammo,
            power: state.loadout.power,
            fire_rate: state.loadout.fire_rate,
            wave: state.wave,
            combo: state.combo.multiplier,
            enemies_defeated: state.enemies_defeated,
            phase: state.phase,
        }
    }
}

/// Transient message for an event, if it deserves one
pub fn message_for_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::WaveStarted { wave } => Some(format!("WAVE {wave}!")),
        GameEvent::PowerUpCollected { message, .. } => Some(message.clone()),
        GameEvent::EnemyKilled { combo, .. } if *combo > 1.0 => Some(format!("COMBO x{combo:.1}")),
        GameEvent::GameOver { score, .. } => Some(format!("GAME OVER - SCORE {score}")),
        GameEvent::Paused => Some("PAUSED".to_string()),
        _ => None,
    }
}

/// Host-side HUD
pub trait Hud {
    fn show_message(&mut self, text: &str);
    fn update_display(&mut self, stats: &HudStats);
}

/// HUD that writes to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogHud {
    last: Option<HudStats>,
}

impl LogHud {
    pub fn last_stats(&self) -> Option<&HudStats> {
        self.last.as_ref()
    }
}

impl Hud for LogHud {
    fn show_message(&mut self, text: &str) {
        log::info!("{}", text);
    }

    fn update_display(&mut self, stats: &HudStats) {
        log::trace!(
            "score={} health={}/{} ammo={}/{} wave={}",
            stats.score,
            stats.health,
            stats.max_health,
            stats.ammo,
            stats.max_ammo,
            stats.wave
        );
        self.last = Some(stats.clone());
    }
}
