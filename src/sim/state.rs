//! Game state and core simulation types
//!
//! `GameState` is the aggregate root: it owns every entity collection and all
//! player stats, and only `tick` mutates it during play.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::enemy::{Enemy, EnemyKind};
use super::geometry::Rect;
use super::particle::{MAX_PARTICLES, Particle, ParticleBurst};
use super::powerup::{Loadout, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::frame_scale;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player health ran out; only a restart leaves this phase
    GameOver,
}

/// Something that happened during a tick, for the driver to present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { bullets: u32 },
    EnemySpawned { kind: EnemyKind },
    EnemyHit { kind: EnemyKind, pos: Vec2 },
    EnemyKilled { kind: EnemyKind, points: u64, combo: f32 },
    EnemyLeaked { kind: EnemyKind, damage: i32 },
    PlayerDamaged { amount: i32, health: i32 },
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind, message: String },
    WaveStarted { wave: u32 },
    DifficultyIncreased { difficulty: f32 },
    AmmoRegenerated { ammo: u32 },
    Paused,
    Resumed,
    GameOver { score: u64, wave: u32 },
    Restarted,
}

impl GameEvent {
    /// True if the event changed a stat shown on the HUD
    pub fn touches_stats(&self) -> bool {
        matches!(
            self,
            GameEvent::ShotFired { .. }
                | GameEvent::EnemyKilled { .. }
                | GameEvent::PlayerDamaged { .. }
                | GameEvent::PowerUpCollected { .. }
                | GameEvent::WaveStarted { .. }
                | GameEvent::AmmoRegenerated { .. }
                | GameEvent::Paused
                | GameEvent::Resumed
                | GameEvent::GameOver { .. }
                | GameEvent::Restarted
        )
    }
}

/// The player's soldier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed per nominal frame
    pub speed: f32,
    /// Animation timer in ms (rendering only)
    pub anim_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_Y),
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            anim_timer: 0.0,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Move left/right within the highway bounds
    pub fn update(&mut self, left: bool, right: bool, dt_ms: f32) {
        let step = self.speed * frame_scale(dt_ms);
        if left && !right {
            self.pos.x -= step;
        } else if right && !left {
            self.pos.x += step;
        }
        self.pos.x = self.pos.x.clamp(PLAYER_MIN_X, PLAYER_MAX_X);
        self.anim_timer += dt_ms;
    }
}

/// Score multiplier for quick consecutive kills
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub multiplier: f32,
    pub last_kill_ms: Option<f64>,
}

impl Default for Combo {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            last_kill_ms: None,
        }
    }
}

impl Combo {
    /// Record a kill at `now_ms` and return the multiplier that applies to it
    pub fn register_kill(&mut self, now_ms: f64) -> f32 {
        let within_window = self
            .last_kill_ms
            .is_some_and(|last| now_ms - last < COMBO_WINDOW_MS);
        self.multiplier = if within_window {
            (self.multiplier + COMBO_STEP).min(COMBO_MAX)
        } else {
            1.0
        };
        self.last_kill_ms = Some(now_ms);
        self.multiplier
    }

    /// Points for a kill worth `base` at the current multiplier
    pub fn points(&self, base: u64) -> u64 {
        (base as f64 * self.multiplier as f64).floor() as u64
    }
}

/// Real-time gates, all measured against accumulated play time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timers {
    pub last_shot_ms: Option<f64>,
    pub last_difficulty_ms: f64,
    pub last_ammo_regen_ms: f64,
    pub last_powerup_roll_ms: f64,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub health: i32,
    pub max_health: i32,
    pub loadout: Loadout,
    /// Current wave (1-based)
    pub wave: u32,
    /// Ticks since the wave started
    pub wave_timer: u32,
    pub frame_count: u64,
    /// Multiplier on enemy spawn chance, only ever grows
    pub difficulty: f32,
    pub combo: Combo,
    pub enemies_defeated: u32,
    /// Milliseconds of play (paused time excluded)
    pub elapsed_ms: f64,
    pub timers: Timers,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub max_particles: usize,
    /// Events since the driver last drained them
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            health: START_HEALTH,
            max_health: START_HEALTH,
            loadout: Loadout::default(),
            wave: 1,
            wave_timer: 0,
            frame_count: 0,
            difficulty: 1.0,
            combo: Combo::default(),
            enemies_defeated: 0,
            elapsed_ms: 0.0,
            timers: Timers::default(),
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Full reinitialization. The RNG keeps running so a restarted run
    /// does not replay the previous one.
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        let max_particles = self.max_particles;
        *self = Self::new(self.seed);
        self.rng = rng;
        self.max_particles = max_particles;
        log::info!("Game restarted");
        self.events.push(GameEvent::Restarted);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// PLAYING <-> PAUSED. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    /// Apply damage to the player, ending the run when health runs out
    pub fn damage_player(&mut self, amount: i32) {
        self.health -= amount;
        self.events.push(GameEvent::PlayerDamaged {
            amount,
            health: self.health,
        });
        if self.health <= 0 && self.phase != GamePhase::GameOver {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {} on wave {} ({} kills)",
                self.score,
                self.wave,
                self.enemies_defeated
            );
            self.events.push(GameEvent::GameOver {
                score: self.score,
                wave: self.wave,
            });
        }
    }

    /// Add an enemy of a given kind at the current wave
    pub fn spawn_enemy(&mut self, kind: EnemyKind) {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, kind, self.wave, &mut self.rng);
        log::debug!("Spawned {} enemy #{} at x={:.0}", kind.as_str(), id, enemy.pos.x);
        self.enemies.push(enemy);
        self.events.push(GameEvent::EnemySpawned { kind });
    }

    /// Add a power-up of a random kind
    pub fn spawn_power_up(&mut self) {
        let id = self.next_entity_id();
        let power_up = PowerUp::spawn(id, &mut self.rng);
        let kind = power_up.kind;
        self.power_ups.push(power_up);
        self.events.push(GameEvent::PowerUpSpawned { kind });
    }

    /// Turn a burst request into particles, dropping the oldest past the cap
    pub fn emit_particles(&mut self, burst: ParticleBurst) {
        if self.max_particles == 0 {
            return;
        }
        let new = burst.emit(&mut self.rng);
        self.particles.extend(new);
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    /// Hand the accumulated events to the driver
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
