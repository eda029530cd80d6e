//! Game state to vertex list
//!
//! Pure conversion of the current entity snapshot into colored quads, so what
//! gets drawn can be checked without a GPU.

use glam::Vec2;

use super::shapes::{centered_square, crosshair, square};
use super::vertex::{Vertex, colors, enemy_color, powerup_color};
use crate::consts::{BULLET_SIZE, POWERUP_SIZE};
use crate::settings::Settings;
use crate::sim::GameState;

/// Build this frame's vertices: power-ups, enemies, bullets, player,
/// explosions, then the crosshair on top
pub fn build_frame(state: &GameState, pointer: Vec2, settings: &Settings) -> Vec<Vertex> {
    let quads = state.powerups.len() + state.enemies.len() + state.bullets.len() + state.explosions.len() + 3;
    let mut vertices = Vec::with_capacity(quads * 6);

    for powerup in &state.powerups {
        vertices.extend(square(powerup.pos, POWERUP_SIZE, powerup_color(powerup.kind)));
    }

    for enemy in &state.enemies {
        vertices.extend(square(enemy.pos, enemy.size, enemy_color(enemy.kind)));
    }

    for bullet in &state.bullets {
        vertices.extend(square(bullet.pos, BULLET_SIZE, colors::BULLET));
    }

    vertices.extend(square(state.player.pos, state.player.size, colors::PLAYER));

    if settings.explosions {
        for explosion in &state.explosions {
            // Grows while fading out
            let grow = 1.0 + (1.0 - explosion.life) * 2.0;
            let center = explosion.pos + Vec2::splat(explosion.size / 2.0);
            let mut color = colors::EXPLOSION;
            color[3] = explosion.life.clamp(0.0, 1.0);
            vertices.extend(centered_square(center, explosion.size * grow, color));
        }
    }

    if settings.crosshair {
        vertices.extend(crosshair(pointer, colors::CROSSHAIR));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Bullet, TickInput, tick};

    fn no_overlays() -> Settings {
        Settings {
            crosshair: false,
            explosions: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_state_draws_player_only() {
        let state = GameState::new(1, 0.0);
        let vertices = build_frame(&state, Vec2::ZERO, &no_overlays());
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.color == colors::PLAYER));
    }

    #[test]
    fn test_crosshair_follows_pointer() {
        let state = GameState::new(1, 0.0);
        let vertices = build_frame(&state, Vec2::new(100.0, 50.0), &Settings::default());
        let cross: Vec<_> = vertices.iter().filter(|v| v.color == colors::CROSSHAIR).collect();
        assert_eq!(cross.len(), 12);
        assert!(cross.iter().any(|v| v.position == [97.0, 50.0]));
    }

    #[test]
    fn test_culled_bullet_never_rendered() {
        let mut state = GameState::new(1, 0.0);
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(1.0, 90.0),
            vel: Vec2::new(-4.0, 0.0),
        });
        assert_eq!(build_frame(&state, Vec2::ZERO, &no_overlays()).len(), 12);

        tick(&mut state, &TickInput::default(), 16.0);
        let vertices = build_frame(&state, Vec2::ZERO, &no_overlays());
        assert!(vertices.iter().all(|v| v.color != colors::BULLET));
    }
}
