//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{EnemyKind, PowerupKind};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.310, 0.643, 1.0, 1.0]; // #4fa4ff
    pub const BULLET: [f32; 4] = [0.949, 0.851, 0.298, 1.0]; // #f2d94c
    pub const ENEMY_NORMAL: [f32; 4] = [0.882, 0.290, 0.290, 1.0]; // #e14a4a
    pub const ENEMY_FAST: [f32; 4] = [0.180, 0.800, 0.443, 1.0]; // #2ecc71
    pub const ENEMY_SMALL: [f32; 4] = [0.204, 0.596, 0.859, 1.0]; // #3498db
    pub const POWERUP_SPEED: [f32; 4] = [0.953, 0.612, 0.071, 1.0];
    pub const POWERUP_MULTISHOT: [f32; 4] = [0.608, 0.349, 0.714, 1.0];
    pub const POWERUP_SLOW: [f32; 4] = [0.102, 0.737, 0.612, 1.0];
    pub const EXPLOSION: [f32; 4] = [1.0, 0.549, 0.259, 1.0];
    pub const CROSSHAIR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}

pub fn enemy_color(kind: EnemyKind) -> [f32; 4] {
    match kind {
        EnemyKind::Normal => colors::ENEMY_NORMAL,
        EnemyKind::Fast => colors::ENEMY_FAST,
        EnemyKind::Small => colors::ENEMY_SMALL,
    }
}

pub fn powerup_color(kind: PowerupKind) -> [f32; 4] {
    match kind {
        PowerupKind::Speed => colors::POWERUP_SPEED,
        PowerupKind::MultiShot => colors::POWERUP_MULTISHOT,
        PowerupKind::Slow => colors::POWERUP_SLOW,
    }
}
