//! Per-frame simulation tick
//!
//! One call advances the game by one logical frame: spawn, then player,
//! bullets, enemies and power-ups, in that order. Movement is expressed in
//! units per tick; timers run on unpaused session time.

use std::collections::HashSet;

use glam::Vec2;

use super::collision::{bullet_enemy_hits, corners_overlap, within_reach};
use super::effects;
use super::spawner;
use super::state::{EXPLOSION_TICKS, Bullet, GameEvent, GameState};
use crate::consts::*;
use crate::{angle_between, angle_to_vec, direction_to, distance, sign};

/// Fixed firing directions bound to the arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinal {
    Up,
    Down,
    Left,
    Right,
}

impl Cardinal {
    /// Screen-space angle (+y points down)
    pub fn angle(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Cardinal::Up => -FRAC_PI_2,
            Cardinal::Down => FRAC_PI_2,
            Cardinal::Left => PI,
            Cardinal::Right => 0.0,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys held (W/A/S/D)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Arrow key held, if any (highest priority fire source)
    pub fire_dir: Option<Cardinal>,
    /// Space held: fire toward the pointer
    pub fire_at_pointer: bool,
    /// Pointer clicked since the last tick
    pub click: bool,
    /// Last known pointer position in playfield coordinates
    pub pointer: Vec2,
    /// Pause toggle pressed since the last tick
    pub pause: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick at wall-clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    // Handle pause toggle
    if input.pause {
        if state.session.is_running() {
            state.session.pause(now_ms);
            state.events.push(GameEvent::Paused);
            return;
        } else if state.session.is_paused() {
            state.session.resume(now_ms);
            state.events.push(GameEvent::Resumed);
        }
    }

    // Don't tick if paused or game over
    if !state.session.is_running() {
        return;
    }

    let elapsed = state.session.elapsed_ms(now_ms);
    let difficulty = state.session.difficulty_at(elapsed);
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    effects::expire(state, elapsed);
    spawner::maybe_spawn(state, elapsed, difficulty);

    move_player(state, input, elapsed);
    handle_shooting(state, input, elapsed);
    update_bullets(state);

    move_enemies(state, difficulty as f32);
    if player_caught(state) {
        state.session.end(now_ms);
        // The swarm is destroyed with the session
        state.enemies.clear();
        let time_secs = state.session.final_time_secs().unwrap_or(0.0);
        log::info!("Game over: survived {:.2}s", time_secs);
        state.events.push(GameEvent::GameOver { time_secs });
        return;
    }
    resolve_bullet_hits(state);

    collect_powerups(state, elapsed);
    update_explosions(state);
}

/// Digital four-way movement, normalized on diagonals, clamped to the playfield
fn move_player(state: &mut GameState, input: &TickInput, now_ms: f64) {
    let mut dir = Vec2::ZERO;
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }

    let player = &mut state.player;
    let moved = dir != Vec2::ZERO;
    if moved {
        player.pos += dir.normalize() * player.speed;
    }
    player.pos.x = player.pos.x.clamp(0.0, (state.width - player.size).max(0.0));
    player.pos.y = player.pos.y.clamp(0.0, (state.height - player.size).max(0.0));

    let step_due = player
        .last_step_ms
        .is_none_or(|last| now_ms - last > FOOTSTEP_COOLDOWN_MS);
    if moved && step_due {
        player.last_step_ms = Some(now_ms);
        state.events.push(GameEvent::Footstep);
    }
}

/// Pick the aim angle from the highest-priority fire source and shoot if the
/// global cooldown allows it
fn handle_shooting(state: &mut GameState, input: &TickInput, now_ms: f64) {
    let origin = state.player.center();
    let aim = if let Some(dir) = input.fire_dir {
        Some(dir.angle())
    } else if input.fire_at_pointer || input.click {
        Some(angle_between(origin, input.pointer))
    } else {
        None
    };
    let Some(angle) = aim else { return };

    if let Some(last) = state.last_shot_ms {
        if now_ms - last < SHOT_COOLDOWN_MS {
            return;
        }
    }
    state.last_shot_ms = Some(now_ms);
    fire(state, angle);
}

/// Aim angles for `count` bullets spread evenly across `arc` around `aim`
pub fn spread_angles(aim: f32, count: u32, arc: f32) -> Vec<f32> {
    if count <= 1 {
        return vec![aim];
    }
    let start = aim - arc / 2.0;
    let step = arc / (count - 1) as f32;
    (0..count).map(|i| start + step * i as f32).collect()
}

fn fire(state: &mut GameState, angle: f32) {
    let origin = state.player.center();
    for a in spread_angles(angle, state.player.shot_count, state.player.spread_arc) {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: origin,
            vel: angle_to_vec(a, BULLET_SPEED),
        });
    }
    state.events.push(GameEvent::Shot);
}

/// Integrate bullets and cull any that left the playfield
fn update_bullets(state: &mut GameState) {
    for bullet in state.bullets.iter_mut() {
        bullet.pos += bullet.vel;
    }
    let (w, h) = (state.width, state.height);
    state
        .bullets
        .retain(|b| b.pos.x >= 0.0 && b.pos.y >= 0.0 && b.pos.x <= w && b.pos.y <= h);
}

/// Move every enemy straight toward the player
fn move_enemies(state: &mut GameState, difficulty: f32) {
    let target = state.player.pos;
    let modifier = state.effects.enemy_speed_multiplier;
    for enemy in state.enemies.iter_mut() {
        let dir = direction_to(enemy.pos, target);
        enemy.pos += dir * enemy.speed * difficulty * modifier;
    }
}

fn player_caught(state: &GameState) -> bool {
    state
        .enemies
        .iter()
        .any(|e| corners_overlap(state.player.pos, e.pos, e.size))
}

/// Destroy enemy/bullet pairs; removal sets are built first, then each
/// collection is filtered once
fn resolve_bullet_hits(state: &mut GameState) {
    let bullet_points: Vec<Vec2> = state.bullets.iter().map(|b| b.pos).collect();
    let enemy_boxes: Vec<(Vec2, f32)> = state.enemies.iter().map(|e| (e.pos, e.size)).collect();
    let hits = bullet_enemy_hits(&bullet_points, &enemy_boxes);
    if hits.is_empty() {
        return;
    }

    let mut dead_bullets = HashSet::with_capacity(hits.len());
    let mut dead_enemies = HashSet::with_capacity(hits.len());
    let mut blasts = Vec::with_capacity(hits.len());
    for (bi, ei) in hits {
        dead_bullets.insert(state.bullets[bi].id);
        let enemy = &state.enemies[ei];
        dead_enemies.insert(enemy.id);
        blasts.push((enemy.pos, enemy.size));
    }

    state.bullets.retain(|b| !dead_bullets.contains(&b.id));
    state.enemies.retain(|e| !dead_enemies.contains(&e.id));
    for (pos, size) in blasts {
        state.push_explosion(pos, size);
        state.events.push(GameEvent::Explosion { pos });
    }
}

fn collect_powerups(state: &mut GameState, now_ms: f64) {
    let player_pos = state.player.pos;
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        if within_reach(player_pos, p.pos, PICKUP_RADIUS) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        effects::activate(state, kind, now_ms);
    }
}

fn update_explosions(state: &mut GameState) {
    for explosion in state.explosions.iter_mut() {
        explosion.life -= 1.0 / EXPLOSION_TICKS;
    }
    state.explosions.retain(|e| e.life > 0.0);
}

/// Distance under which an enemy counts as a threat for the autopilot
const THREAT_RADIUS: f32 = 60.0;

/// Demo AI: flee nearby enemies, shoot the closest one, grab power-ups when safe
fn autopilot(state: &GameState, input: &mut TickInput) {
    let me = state.player.center();
    let center = Vec2::new(state.width / 2.0, state.height / 2.0);

    let nearest = state
        .enemies
        .iter()
        .map(|e| (e, distance(me, e.pos + Vec2::splat(e.size / 2.0))))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    // Repulsion from close enemies plus a weak pull back toward the middle
    let mut steer = (center - me) * 0.002;
    for enemy in &state.enemies {
        let away = me - enemy.pos;
        let dist = away.length();
        if dist < THREAT_RADIUS {
            steer += away / dist.max(1.0).powi(2);
        }
    }

    let threatened = nearest.is_some_and(|(_, d)| d < THREAT_RADIUS);
    if !threatened {
        if let Some(p) = state
            .powerups
            .iter()
            .min_by(|a, b| {
                distance(me, a.pos)
                    .partial_cmp(&distance(me, b.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        {
            steer = direction_to(state.player.pos, p.pos);
        }
    }

    let dead_zone = 0.01;
    let sx = if steer.x.abs() > dead_zone { sign(steer.x) } else { 0.0 };
    let sy = if steer.y.abs() > dead_zone { sign(steer.y) } else { 0.0 };
    input.left = sx < 0.0;
    input.right = sx > 0.0;
    input.up = sy < 0.0;
    input.down = sy > 0.0;

    if let Some((enemy, _)) = nearest {
        input.pointer = enemy.pos + Vec2::splat(enemy.size / 2.0);
        input.fire_at_pointer = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyKind, Powerup, PowerupKind};
    use crate::sim::GamePhase;
    use proptest::prelude::*;

    fn enemy_at(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            kind: EnemyKind::Normal,
            size: 6.0,
            speed: 0.45,
        });
        id
    }

    #[test]
    fn test_enemy_moves_toward_player() {
        let mut state = GameState::new(1, 0.0);
        enemy_at(&mut state, Vec2::new(160.0, -8.0));

        let now = TICK_MS;
        tick(&mut state, &TickInput::default(), now);

        let expected = -8.0 + 0.45 * state.session.difficulty(now) as f32;
        let enemy = &state.enemies[0];
        assert!(enemy.pos.y > -8.0);
        assert!((enemy.pos.y - expected).abs() < 1e-5);
        assert_eq!(enemy.pos.x, 160.0);
    }

    #[test]
    fn test_slow_modifier_halves_enemy_step() {
        let mut state = GameState::new(1, 0.0);
        enemy_at(&mut state, Vec2::new(160.0, -8.0));
        state.effects.enemy_speed_multiplier = 0.5;
        state.effects.slow_until_ms = Some(5000.0);

        tick(&mut state, &TickInput::default(), TICK_MS);
        let step = state.enemies[0].pos.y + 8.0;
        let full = 0.45 * state.session.difficulty(TICK_MS) as f32;
        assert!((step - full * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_contact_ends_game_and_freezes() {
        let mut state = GameState::new(1, 0.0);
        enemy_at(&mut state, Vec2::new(163.0, 92.0));

        tick(&mut state, &TickInput::default(), 2000.0);
        assert_eq!(state.phase(), GamePhase::GameOver);
        let events = state.drain_events();
        assert!(matches!(events.last(), Some(GameEvent::GameOver { time_secs }) if *time_secs == 2.0));

        assert!(state.enemies.is_empty());

        // Nothing moves or spawns after game over
        let before = (state.player.pos, state.enemies.len(), state.time_ticks);
        let input = TickInput {
            right: true,
            click: true,
            ..Default::default()
        };
        for i in 1..200 {
            tick(&mut state, &input, 2000.0 + i as f64 * 100.0);
        }
        assert_eq!(before, (state.player.pos, state.enemies.len(), state.time_ticks));
        assert!(state.bullets.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_final_time_is_wall_clock_minus_pauses() {
        let mut state = GameState::new(1, 1000.0);
        state.tuning.powerup_chance = 0.0;
        let idle = TickInput::default();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        // Frame hitch: one tick after 400 ms of wall time
        tick(&mut state, &idle, 1400.0);
        tick(&mut state, &pause, 2000.0);
        tick(&mut state, &idle, 5000.0);
        tick(&mut state, &pause, 7000.0);
        tick(&mut state, &idle, 7500.0);
        tick(&mut state, &pause, 8000.0);
        tick(&mut state, &pause, 9500.0);
        assert_eq!(state.session.paused_ms(9500.0), 6500.0);

        let pos = state.player.pos + Vec2::new(3.0, 2.0);
        enemy_at(&mut state, pos);
        tick(&mut state, &idle, 12_250.0);

        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.session.final_time_secs(), Some(4.75));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::GameOver { time_secs: 4.75 })
        );
        assert_eq!(state.session.elapsed_secs(20_000.0), 4.75);
    }

    #[test]
    fn test_bullet_hit_removes_both() {
        let mut state = GameState::new(1, 0.0);
        enemy_at(&mut state, Vec2::new(40.0, 40.0));
        let id = state.next_entity_id();
        // Lands at (43, 43) after integration, inside the enemy's new box
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(39.0, 43.0),
            vel: Vec2::new(4.0, 0.0),
        });

        tick(&mut state, &TickInput::default(), TICK_MS);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        let explosions = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Explosion { .. }))
            .count();
        assert_eq!(explosions, 1);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut state = GameState::new(1, 0.0);
        let input = TickInput {
            click: true,
            pointer: Vec2::new(300.0, 93.0),
            ..Default::default()
        };
        tick(&mut state, &input, 10.0);
        tick(&mut state, &input, 100.0);
        let shots = |events: Vec<GameEvent>| events.iter().filter(|e| **e == GameEvent::Shot).count();
        assert_eq!(shots(state.drain_events()), 1);
        assert_eq!(state.bullets.len(), 1);

        tick(&mut state, &input, 180.0);
        assert_eq!(shots(state.drain_events()), 1);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_arrow_keys_take_priority() {
        let mut state = GameState::new(1, 0.0);
        let input = TickInput {
            fire_dir: Some(Cardinal::Up),
            click: true,
            pointer: Vec2::new(300.0, 93.0),
            ..Default::default()
        };
        tick(&mut state, &input, 10.0);
        let bullet = &state.bullets[0];
        assert!(bullet.vel.x.abs() < 1e-5);
        assert!((bullet.vel.y + BULLET_SPEED).abs() < 1e-5);
    }

    #[test]
    fn test_multishot_spread() {
        let angles = spread_angles(0.0, 3, SPREAD_ARC);
        assert_eq!(angles.len(), 3);
        assert!((angles[0] + SPREAD_ARC / 2.0).abs() < 1e-6);
        assert!(angles[1].abs() < 1e-6);
        assert!((angles[2] - SPREAD_ARC / 2.0).abs() < 1e-6);
        assert_eq!(spread_angles(1.0, 1, SPREAD_ARC), vec![1.0]);

        let mut state = GameState::new(1, 0.0);
        state.player.shot_count = 5;
        let input = TickInput {
            fire_dir: Some(Cardinal::Right),
            ..Default::default()
        };
        tick(&mut state, &input, 10.0);
        assert_eq!(state.bullets.len(), 5);
        let shots = state.drain_events().into_iter().filter(|e| *e == GameEvent::Shot).count();
        assert_eq!(shots, 1);
    }

    #[test]
    fn test_bullets_culled_off_screen() {
        let mut state = GameState::new(1, 0.0);
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(318.0, 50.0),
            vel: Vec2::new(4.0, 0.0),
        });
        tick(&mut state, &TickInput::default(), TICK_MS);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut state = GameState::new(1, 0.0);
        let start = state.player.pos;
        let input = TickInput {
            up: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, TICK_MS);
        let moved = state.player.pos - start;
        assert!((moved.length() - PLAYER_SPEED).abs() < 1e-5);
    }

    #[test]
    fn test_player_clamped() {
        let mut state = GameState::new(1, 0.0);
        state.player.pos = Vec2::new(1.0, 173.0);
        let input = TickInput {
            left: true,
            down: true,
            ..Default::default()
        };
        for i in 0..10 {
            tick(&mut state, &input, TICK_MS * (i + 1) as f64);
        }
        assert_eq!(state.player.pos, Vec2::new(0.0, 180.0 - PLAYER_SIZE));
    }

    #[test]
    fn test_footstep_cooldown() {
        let mut state = GameState::new(1, 0.0);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        // 30 ticks ~ 500ms of movement
        for i in 0..30 {
            tick(&mut state, &input, TICK_MS * (i + 1) as f64);
        }
        let steps = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Footstep)
            .count();
        assert_eq!(steps, 2);
    }

    #[test]
    fn test_pickup_slow_and_expiry() {
        let mut state = GameState::new(1, 0.0);
        state.tuning.powerup_chance = 0.0;
        let id = state.next_entity_id();
        state.powerups.push(Powerup {
            id,
            kind: PowerupKind::Slow,
            pos: Vec2::new(163.0, 93.0),
            created_ms: 0.0,
        });

        tick(&mut state, &TickInput::default(), 100.0);
        assert!(state.powerups.is_empty());
        assert_eq!(state.effects.enemy_speed_multiplier, 0.5);

        tick(&mut state, &TickInput::default(), 5099.0);
        assert_eq!(state.effects.enemy_speed_multiplier, 0.5);
        tick(&mut state, &TickInput::default(), 5100.0);
        assert_eq!(state.effects.enemy_speed_multiplier, 1.0);
    }

    #[test]
    fn test_pause_freezes_effect_timers() {
        let mut state = GameState::new(1, 0.0);
        state.tuning.powerup_chance = 0.0;
        crate::sim::effects::activate(&mut state, PowerupKind::Slow, 0.0);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 1000.0);
        assert_eq!(state.phase(), GamePhase::Paused);
        tick(&mut state, &pause, 10_000.0);
        assert_eq!(state.phase(), GamePhase::Playing);

        // Only 1000 + 1000 ms of play have elapsed
        tick(&mut state, &TickInput::default(), 11_000.0);
        assert_eq!(state.effects.enemy_speed_multiplier, 0.5);
    }

    #[test]
    fn test_autopilot_shoots_nearest_enemy() {
        let mut state = GameState::new(1, 0.0);
        enemy_at(&mut state, Vec2::new(250.0, 90.0));
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input, TICK_MS);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.bullets[0].vel.x > 0.0);
    }

    proptest! {
        #[test]
        fn prop_paused_ticks_change_nothing(
            seed in any::<u64>(),
            warmup in 1usize..120,
            keys in proptest::collection::vec(any::<(bool, bool, bool, bool, bool)>(), 1..60),
        ) {
            let mut state = GameState::new(seed, 0.0);
            state.tuning.powerup_chance = 0.5;
            let mut now = 0.0;
            for _ in 0..warmup {
                now += TICK_MS;
                tick(&mut state, &TickInput { idle_mode: true, ..Default::default() }, now);
            }
            prop_assume!(state.session.is_running());

            now += TICK_MS;
            tick(&mut state, &TickInput { pause: true, ..Default::default() }, now);
            prop_assert!(state.session.is_paused());

            let snapshot = |s: &GameState| {
                (
                    s.player.pos,
                    s.enemies.iter().map(|e| e.pos).collect::<Vec<_>>(),
                    s.bullets.iter().map(|b| b.pos).collect::<Vec<_>>(),
                    s.powerups.len(),
                    s.time_ticks,
                )
            };
            let before = snapshot(&state);
            let elapsed = state.session.elapsed_ms(now);
            let difficulty = state.session.difficulty(now);

            for (up, down, left, right, click) in keys {
                now += TICK_MS;
                let input = TickInput { up, down, left, right, click, ..Default::default() };
                tick(&mut state, &input, now);
            }

            prop_assert_eq!(before, snapshot(&state));
            prop_assert_eq!(elapsed, state.session.elapsed_ms(now));
            prop_assert_eq!(difficulty, state.session.difficulty(now));
        }

        #[test]
        fn prop_bullets_stay_in_bounds(seed in any::<u64>(), ticks in 1usize..300) {
            let mut state = GameState::new(seed, 0.0);
            let mut now = 0.0;
            for _ in 0..ticks {
                now += TICK_MS;
                tick(&mut state, &TickInput { idle_mode: true, ..Default::default() }, now);
                for bullet in &state.bullets {
                    prop_assert!(state.in_bounds(bullet.pos));
                }
            }
        }
    }
}
