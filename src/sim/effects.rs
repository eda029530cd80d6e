//! Timed power-up effects
//!
//! Picking up a power-up applies its stat change immediately and stores an
//! expiry time. A second pickup of an active type resets the expiry to a fresh
//! duration; magnitudes are capped, so Speed and Slow never compound and
//! MultiShot stops at `max_shots`. Expired effects return to baseline.

use super::state::{GameEvent, GameState, PowerupKind};

/// Apply a collected power-up at session time `now_ms`
pub fn activate(state: &mut GameState, kind: PowerupKind, now_ms: f64) {
    let until = Some(now_ms + state.tuning.effect_duration_ms);
    match kind {
        PowerupKind::Speed => {
            state.player.speed = state.player.base_speed * state.tuning.speed_boost;
            state.effects.speed_until_ms = until;
        }
        PowerupKind::MultiShot => {
            let next = state.player.shot_count + state.tuning.multishot_step;
            state.player.shot_count = next.min(state.tuning.max_shots.max(1));
            state.effects.multishot_until_ms = until;
        }
        PowerupKind::Slow => {
            state.effects.enemy_speed_multiplier = state.tuning.slow_factor;
            state.effects.slow_until_ms = until;
        }
    }
    log::info!("Power-up {:?} active until {:.0}ms", kind, now_ms + state.tuning.effect_duration_ms);
    state.events.push(GameEvent::PowerUp { kind });
}

/// Revert every effect whose expiry has passed
pub fn expire(state: &mut GameState, now_ms: f64) {
    if take_expired(&mut state.effects.speed_until_ms, now_ms) {
        state.player.speed = state.player.base_speed;
        log::debug!("Speed boost expired");
    }
    if take_expired(&mut state.effects.multishot_until_ms, now_ms) {
        state.player.shot_count = 1;
        log::debug!("Multi-shot expired");
    }
    if take_expired(&mut state.effects.slow_until_ms, now_ms) {
        state.effects.enemy_speed_multiplier = 1.0;
        log::debug!("Slow expired");
    }
}

fn take_expired(until: &mut Option<f64>, now_ms: f64) -> bool {
    match *until {
        Some(t) if now_ms >= t => {
            *until = None;
            true
        }
        _ => false,
    }
}
