//! Vertex and color types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

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

    pub fn at(point: Vec2, color: Color) -> Self {
        Self::new(point.x, point.y, color.to_linear())
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

/// 8-bit sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray of the given level
    pub const fn gray(level: u8) -> Self {
        Self::rgba(level, level, level, 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Linear-space floats for an sRGB surface
    pub fn to_linear(self) -> [f32; 4] {
        let channel = |c: u8| (c as f32 / 255.0).powf(2.2);
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a as f32 / 255.0,
        ]
    }

    /// CSS `rgba()` string for DOM text
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::gray(0);
    pub const WHITE: Color = Color::gray(255);
    pub const LIGHT_GRAY: Color = Color::gray(200);
    pub const MEDIUM_GRAY: Color = Color::gray(150);
    pub const GRAY: Color = Color::gray(128);
    pub const BRICK: Color = Color::gray(64);
    pub const DARK_GRAY: Color = Color::gray(50);
    /// Game over dimming layer
    pub const OVERLAY: Color = Color::rgba(0, 0, 0, 200);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(colors::WHITE.to_linear(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(colors::BLACK.to_linear(), [0.0, 0.0, 0.0, 1.0]);

        let mid = colors::GRAY.to_linear();
        assert!(mid[0] > 0.0 && mid[0] < 0.5);
    }

    #[test]
    fn test_css() {
        assert_eq!(colors::OVERLAY.to_css(), "rgba(0, 0, 0, 0.784)");
        assert_eq!(Color::gray(200).with_alpha(255), colors::LIGHT_GRAY);
    }
}
