//! Shape generation for 2D primitives
//!
//! Coordinates are playfield units with the origin at the top-left corner.

use glam::Vec2;

use super::vertex::Vertex;

/// Two triangles covering the axis-aligned rectangle at `pos` (top-left)
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Filled square with side `size`
pub fn square(pos: Vec2, size: f32, color: [f32; 4]) -> [Vertex; 6] {
    rect(pos, Vec2::splat(size), color)
}

/// Square of side `size` centred on `center`
pub fn centered_square(center: Vec2, size: f32, color: [f32; 4]) -> [Vertex; 6] {
    square(center - Vec2::splat(size / 2.0), size, color)
}

/// Crosshair: a 6x1 horizontal bar and a 1x6 vertical bar around `at`
pub fn crosshair(at: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(12);
    vertices.extend(rect(Vec2::new(at.x - 3.0, at.y), Vec2::new(6.0, 1.0), color));
    vertices.extend(rect(Vec2::new(at.x, at.y - 3.0), Vec2::new(1.0, 6.0), color));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 4.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 2.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 6.0);
    }

    #[test]
    fn test_centered_square() {
        let verts = centered_square(Vec2::new(10.0, 10.0), 4.0, [1.0; 4]);
        assert_eq!(verts[0].position, [8.0, 8.0]);
        assert_eq!(verts[5].position, [12.0, 12.0]);
    }

    #[test]
    fn test_crosshair_is_two_quads() {
        assert_eq!(crosshair(Vec2::new(50.0, 50.0), [1.0; 4]).len(), 12);
    }
}
