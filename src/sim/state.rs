//! Game state and core simulation types
//!
//! Everything a tick reads or mutates lives in `GameState`, owned by the frame
//! driver and passed by reference into each subsystem.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::session::{GamePhase, Session};
use crate::consts::*;
use crate::tuning::{EnemyTuning, Tuning};

/// The player's square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub base_speed: f32,
    /// Current speed (raised by the Speed power-up)
    pub speed: f32,
    /// Bullets per shot (raised by MultiShot)
    pub shot_count: u32,
    /// Arc covered by a multi-shot spread (radians)
    pub spread_arc: f32,
    /// Session time of the last footstep event
    pub last_step_ms: Option<f64>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: PLAYER_SIZE,
            base_speed: PLAYER_SPEED,
            speed: PLAYER_SPEED,
            shot_count: 1,
            spread_arc: SPREAD_ARC,
            last_step_ms: None,
        }
    }

    /// Centre of the bounding box (bullet origin)
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    Fast,
    Small,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Small];

    /// Balance constants for this variant
    pub fn tuning(self, tuning: &Tuning) -> EnemyTuning {
        match self {
            EnemyKind::Normal => tuning.normal,
            EnemyKind::Fast => tuning.fast,
            EnemyKind::Small => tuning.small,
        }
    }
}

/// An enemy chasing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub size: f32,
    /// Units per tick at difficulty 1.0
    pub speed: f32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Temporarily raises player speed
    Speed,
    /// Temporarily adds bullets to each shot
    MultiShot,
    /// Temporarily halves enemy speed
    Slow,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [PowerupKind::Speed, PowerupKind::MultiShot, PowerupKind::Slow];
}

/// A power-up waiting to be collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec2,
    /// Session time at creation
    pub created_ms: f64,
}

/// Active power-up effects.
///
/// Each timed effect stores the session time at which it expires; the tick
/// reverts the stat once that time has passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub speed_until_ms: Option<f64>,
    pub multishot_until_ms: Option<f64>,
    pub slow_until_ms: Option<f64>,
    /// Global enemy speed multiplier (1.0 normally, reduced by Slow)
    pub enemy_speed_multiplier: f32,
}

impl Default for ActiveEffects {
    fn default() -> Self {
        Self {
            speed_until_ms: None,
            multishot_until_ms: None,
            slow_until_ms: None,
            enemy_speed_multiplier: 1.0,
        }
    }
}

/// Explosion burst left behind by a destroyed enemy (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub size: f32,
    /// 0-1, decreases over time
    pub life: f32,
}

/// Explosion lifetime in ticks
pub const EXPLOSION_TICKS: f32 = 18.0;

/// Maximum simultaneous explosions kept for rendering
pub const MAX_EXPLOSIONS: usize = 32;

/// Notable things that happened during a tick (audio, HUD, leaderboard)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shot,
    Explosion { pos: Vec2 },
    PowerUp { kind: PowerupKind },
    Footstep,
    Paused,
    Resumed,
    GameOver { time_secs: f64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub session: Session,
    /// Simulation tick counter (only advances while playing)
    pub time_ticks: u64,
    pub width: f32,
    pub height: f32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    pub effects: ActiveEffects,
    pub explosions: Vec<Explosion>,
    /// Events produced since the driver last drained them
    pub events: Vec<GameEvent>,
    /// Session time of the last enemy spawn
    pub last_spawn_ms: f64,
    /// Session time of the last shot (global cooldown)
    pub last_shot_ms: Option<f64>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game on the default playfield, starting the clock at `now_ms`
    pub fn new(seed: u64, now_ms: f64) -> Self {
        Self::with_tuning(seed, now_ms, Tuning::default())
    }

    pub fn with_tuning(seed: u64, now_ms: f64, tuning: Tuning) -> Self {
        let width = PLAYFIELD_WIDTH;
        let height = PLAYFIELD_HEIGHT;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: Session::start(now_ms, tuning.difficulty_per_sec),
            tuning,
            time_ticks: 0,
            width,
            height,
            player: Player::new(Vec2::new(width / 2.0, height / 2.0)),
            bullets: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            explosions: Vec::new(),
            events: Vec::new(),
            last_spawn_ms: 0.0,
            last_shot_ms: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether `pos` lies inside the closed playfield rectangle
    pub fn in_bounds(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= self.width && pos.y <= self.height
    }

    pub fn push_explosion(&mut self, pos: Vec2, size: f32) {
        if self.explosions.len() >= MAX_EXPLOSIONS {
            self.explosions.remove(0);
        }
        self.explosions.push(Explosion {
            pos,
            size,
            life: 1.0,
        });
    }
}
