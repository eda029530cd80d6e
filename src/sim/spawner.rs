//! Enemy and power-up spawning
//!
//! Enemies arrive from just outside a random edge at a rate that scales with
//! difficulty; each enemy spawn may also drop a power-up somewhere inside the
//! playfield.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState, Powerup, PowerupKind};
use crate::consts::*;

/// Playfield edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// Spawn at most one enemy (and maybe one power-up) if the interval has elapsed.
///
/// Returns true when an enemy was spawned.
pub fn maybe_spawn(state: &mut GameState, elapsed_ms: f64, difficulty: f64) -> bool {
    let interval = state.tuning.spawn_interval_ms / difficulty.max(1.0);
    if elapsed_ms - state.last_spawn_ms <= interval {
        return false;
    }

    spawn_enemy(state);
    if state.rng.random_bool(state.tuning.powerup_chance.clamp(0.0, 1.0)) {
        spawn_powerup(state, elapsed_ms);
    }
    state.last_spawn_ms = elapsed_ms;
    true
}

/// Pick a variant from the weighted distribution
pub fn roll_enemy_kind(state: &mut GameState) -> EnemyKind {
    let total: f32 = EnemyKind::ALL
        .iter()
        .map(|k| k.tuning(&state.tuning).weight.max(0.0))
        .sum();
    if total <= 0.0 {
        return EnemyKind::Normal;
    }

    let mut roll = state.rng.random::<f32>() * total;
    for kind in EnemyKind::ALL {
        let weight = kind.tuning(&state.tuning).weight.max(0.0);
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    EnemyKind::Small
}

/// Position just outside `edge` at coordinate fraction `t` (0-1) along it
pub fn edge_position(edge: Edge, t: f32, width: f32, height: f32) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(t * width, -SPAWN_MARGIN),
        Edge::Bottom => Vec2::new(t * width, height + SPAWN_MARGIN),
        Edge::Left => Vec2::new(-SPAWN_MARGIN, t * height),
        Edge::Right => Vec2::new(width + SPAWN_MARGIN, t * height),
    }
}

pub fn spawn_enemy(state: &mut GameState) {
    let kind = roll_enemy_kind(state);
    let edge = Edge::ALL[state.rng.random_range(0..Edge::ALL.len())];
    let t = state.rng.random::<f32>();
    let pos = edge_position(edge, t, state.width, state.height);
    let params = kind.tuning(&state.tuning);

    let id = state.next_entity_id();
    log::debug!("Spawned {:?} enemy {} at {:?} ({:?} edge)", kind, id, pos, edge);
    state.enemies.push(Enemy {
        id,
        pos,
        kind,
        size: params.size,
        speed: params.speed,
    });
}

pub fn spawn_powerup(state: &mut GameState, elapsed_ms: f64) {
    let kind = PowerupKind::ALL[state.rng.random_range(0..PowerupKind::ALL.len())];
    let inner_w = (state.width - 2.0 * POWERUP_INSET).max(0.0);
    let inner_h = (state.height - 2.0 * POWERUP_INSET).max(0.0);
    let pos = Vec2::new(
        POWERUP_INSET + state.rng.random::<f32>() * inner_w,
        POWERUP_INSET + state.rng.random::<f32>() * inner_h,
    );

    let id = state.next_entity_id();
    log::debug!("Spawned {:?} power-up {} at {:?}", kind, id, pos);
    state.powerups.push(Powerup {
        id,
        kind,
        pos,
        created_ms: elapsed_ms,
    });
}
