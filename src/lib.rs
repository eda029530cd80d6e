//! Last Seconds - A top-down survival shooter
//!
//! Core modules:
//! - `sim`: Simulation (session clock, spawning, movement, collisions, power-ups)
//! - `renderer`: Snapshot-to-quad conversion and the WebGPU pipeline
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `leaderboard`: Pluggable survival-time leaderboard
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod leaderboard;
pub mod platform;
pub mod profile;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use leaderboard::{Leaderboard, LeaderboardRecord, LocalLeaderboard, NoopLeaderboard};
pub use profile::{NameError, PlayerProfile};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frame driver rate (one logical tick per rendered frame)
    pub const TICK_RATE: f64 = 60.0;
    /// Milliseconds per tick at the nominal rate
    pub const TICK_MS: f64 = 1000.0 / TICK_RATE;
    /// Maximum ticks per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 320.0;
    pub const PLAYFIELD_HEIGHT: f32 = 180.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 6.0;
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const FOOTSTEP_COOLDOWN_MS: f64 = 300.0;

    /// Bullets (units per tick)
    pub const BULLET_SPEED: f32 = 4.0;
    pub const BULLET_SIZE: f32 = 2.0;
    pub const SHOT_COOLDOWN_MS: f64 = 160.0;
    /// Total arc covered by a multi-shot spread (45 degrees)
    pub const SPREAD_ARC: f32 = std::f32::consts::FRAC_PI_4;

    /// Enemies spawn this far outside the playfield edge
    pub const SPAWN_MARGIN: f32 = 8.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 6.0;
    pub const POWERUP_INSET: f32 = 10.0;
    pub const PICKUP_RADIUS: f32 = 6.0;
}

/// Unit vector pointing from `from` toward `to`.
///
/// The distance is floored at 1 unit so coincident points never produce a
/// non-finite velocity.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    delta / delta.length().max(1.0)
}

/// Convert an angle (radians, screen space: +y is down) to a vector of length `len`
#[inline]
pub fn angle_to_vec(angle: f32, len: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * len
}

/// Angle from `from` toward `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Sign of `v` as -1, 0 or 1
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Round to two decimal places (leaderboard precision)
#[inline]
pub fn round_centis(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_to_is_unit() {
        let dir = direction_to(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_direction_to_coincident_points_is_finite() {
        let p = Vec2::new(10.0, 10.0);
        let dir = direction_to(p, p);
        assert!(dir.is_finite());
        assert_eq!(dir, Vec2::ZERO);
    }

    #[test]
    fn test_angle_to_vec() {
        let v = angle_to_vec(std::f32::consts::FRAC_PI_2, 4.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_sign_and_rounding() {
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(0.1), 1.0);
        assert_eq!(round_centis(12.3456), 12.35);
    }
}
