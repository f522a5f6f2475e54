//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Timers measured in accumulated play time, never wall clock
//! - Stable iteration order (collection order)
//! - No rendering, audio or platform dependencies
//!
//! Entities never reach back into the game state. They take read-only
//! parameters and report what happened; `GameState` turns those reports into
//! `GameEvent`s for the driver.

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod geometry;
pub mod particle;
pub mod powerup;
pub mod state;
pub mod tick;

pub use bullet::Bullet;
pub use collision::resolve_collisions;
pub use enemy::{Enemy, EnemyEvent, EnemyKind, EnemyState};
pub use geometry::{DepthScale, Rect, overlaps};
pub use particle::{Particle, ParticleBurst};
pub use powerup::{Loadout, PowerUp, PowerUpKind, PowerUpState};
pub use state::{Combo, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, shoot, tick};
