//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes from the caller, never from a system clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{bullet_enemy_hits, corners_overlap, point_in_box, within_reach};
pub use session::{GamePhase, Session};
pub use spawner::{Edge, maybe_spawn};
pub use state::{
    ActiveEffects, Bullet, Enemy, EnemyKind, Explosion, GameEvent, GameState, Player, Powerup,
    PowerupKind,
};
pub use tick::{Cardinal, TickInput, spread_angles, tick};
