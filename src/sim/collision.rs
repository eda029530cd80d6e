//! Collision detection for axis-aligned squares
//!
//! Entities are squares anchored at their top-left corner. Every test here is a
//! plain AABB comparison; there is no collision response beyond removal.

use glam::Vec2;

/// Corner-distance overlap test used for player/enemy contact.
///
/// True when both axis distances between the two top-left corners are strictly
/// less than `size`.
#[inline]
pub fn corners_overlap(a: Vec2, b: Vec2, size: f32) -> bool {
    (a.x - b.x).abs() < size && (a.y - b.y).abs() < size
}

/// Whether `point` lies strictly inside the square at `box_pos` with side `size`
#[inline]
pub fn point_in_box(point: Vec2, box_pos: Vec2, size: f32) -> bool {
    point.x > box_pos.x
        && point.x < box_pos.x + size
        && point.y > box_pos.y
        && point.y < box_pos.y + size
}

/// Axis-aligned proximity test (pickup range)
#[inline]
pub fn within_reach(a: Vec2, b: Vec2, threshold: f32) -> bool {
    corners_overlap(a, b, threshold)
}

/// Pair each bullet with at most one enemy it hits this tick.
///
/// Returns `(bullet_index, enemy_index)` pairs. A bullet that already hit
/// something is not tested against further enemies, and an enemy that was
/// already hit is not available to later bullets.
pub fn bullet_enemy_hits(bullets: &[Vec2], enemies: &[(Vec2, f32)]) -> Vec<(usize, usize)> {
    let mut enemy_taken = vec![false; enemies.len()];
    let mut hits = Vec::new();

    for (bi, &bullet) in bullets.iter().enumerate() {
        let target = enemies
            .iter()
            .enumerate()
            .find(|&(ei, &(pos, size))| !enemy_taken[ei] && point_in_box(bullet, pos, size));
        if let Some((ei, _)) = target {
            enemy_taken[ei] = true;
            hits.push((bi, ei));
        }
    }

    hits
}
