//! Shape generation for 2D primitives
//!
//! Output is in playfield coordinates; the pipeline maps to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Color, Vertex};
use crate::sim::Rect;

/// Segments used for ellipses
pub const ELLIPSE_SEGMENTS: u32 = 24;

/// Two triangles covering `rect`
pub fn rect(rect: &Rect, color: Color) -> Vec<Vertex> {
    let (min, max) = (rect.pos, rect.pos + rect.size);
    let corners = [
        min,
        Vec2::new(max.x, min.y),
        max,
        Vec2::new(min.x, max.y),
    ];

    [0, 1, 2, 0, 2, 3]
        .into_iter()
        .map(|i| Vertex::at(corners[i], color))
        .collect()
}

/// Border of `rect` drawn inward with the given width
pub fn rect_outline(outer: &Rect, width: f32, color: Color) -> Vec<Vertex> {
    let width = width.min(outer.size.x / 2.0).min(outer.size.y / 2.0);
    if width <= 0.0 {
        return Vec::new();
    }

    let inner_h = outer.size.y - 2.0 * width;
    let bands = [
        // Top and bottom span the full width
        Rect::new(outer.left(), outer.top(), outer.size.x, width),
        Rect::new(outer.left(), outer.bottom() - width, outer.size.x, width),
        // Sides fill the gap between them
        Rect::new(outer.left(), outer.top() + width, width, inner_h),
        Rect::new(outer.right() - width, outer.top() + width, width, inner_h),
    ];

    bands.iter().flat_map(|band| rect(band, color)).collect()
}

/// Generate vertices for a filled ellipse inscribed in `bounds`
pub fn ellipse(bounds: &Rect, color: Color, segments: u32) -> Vec<Vertex> {
    let center = bounds.center();
    let radii = bounds.size / 2.0;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(
            center + radii * Vec2::new(theta1.cos(), theta1.sin()),
            color,
        ));
        vertices.push(Vertex::at(
            center + radii * Vec2::new(theta2.cos(), theta2.sin()),
            color,
        ));
    }

    vertices
}
