//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Tint;

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
    /// #0b0f1a
    pub const BACKGROUND: [f32; 4] = [0.043, 0.059, 0.102, 1.0];
    /// #9bb1e4 at 8%
    pub const GRID: [f32; 4] = [0.608, 0.694, 0.894, 0.08];
    /// Player glow at its center; fades to transparent at the edge
    pub const PLAYER_GLOW: [f32; 4] = [0.361, 0.961, 0.780, 0.6];
}

/// Unpack 0xRRGGBB
pub fn rgb_hex(hex: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}

/// HSL to RGB; hue in degrees, saturation and lightness in 0..=1
pub fn hsl(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, alpha]
}

/// Resolve a simulation tint; hues render at 80% saturation, 60% lightness
pub fn tint_color(tint: Tint, alpha: f32) -> [f32; 4] {
    match tint {
        Tint::Hue(h) => hsl(h as f32, 0.8, 0.6, alpha),
        Tint::Rgb(hex) => rgb_hex(hex, alpha),
    }
}
