//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in arena pixels (y down).

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Radial gradient disc: solid `inner_color` up to `inner_radius`, then
/// blending linearly to `outer_color` at `outer_radius`
pub fn radial_glow(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = circle(center, inner_radius, inner_color, segments);
    vertices.reserve((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Rectangle with rounded corners, rotated by `angle` radians about its
/// center. The corner radius is capped at half the shorter side.
pub fn rounded_rect(
    center: Vec2,
    half_extents: Vec2,
    corner_radius: f32,
    angle: f32,
    color: [f32; 4],
    corner_segments: u32,
) -> Vec<Vertex> {
    let r = corner_radius.min(half_extents.x).min(half_extents.y).max(0.0);
    let inner = half_extents - Vec2::splat(r);
    let rotation = Vec2::from_angle(angle);
    let segments = corner_segments.max(1);

    // Corner arc centers, clockwise on screen starting bottom-right
    let corners = [
        (Vec2::new(inner.x, inner.y), 0.0),
        (Vec2::new(-inner.x, inner.y), FRAC_PI_2),
        (Vec2::new(-inner.x, -inner.y), PI),
        (Vec2::new(inner.x, -inner.y), PI + FRAC_PI_2),
    ];

    let mut outline = Vec::with_capacity(4 * (segments as usize + 1));
    for (arc_center, start) in corners {
        for i in 0..=segments {
            let theta = start + (i as f32 / segments as f32) * FRAC_PI_2;
            let local = arc_center + Vec2::new(theta.cos(), theta.sin()) * r;
            outline.push(center + rotation.rotate(local));
        }
    }

    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for (i, a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }

    vertices
}

/// Straight segment of the given width as a quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    fn pos(v: &Vertex) -> Vec2 {
        Vec2::new(v.position[0], v.position[1])
    }

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 10.0, WHITE, 24);
        assert_eq!(verts.len(), 72);
        for v in &verts {
            assert!(pos(v).length() <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_glow_fades_outward() {
        let clear = [1.0, 1.0, 1.0, 0.0];
        let verts = radial_glow(Vec2::ZERO, 2.0, 20.0, WHITE, clear, 12);
        assert_eq!(verts.len(), 12 * 3 + 12 * 6);
        for v in &verts {
            let d = pos(v).length();
            if d > 19.0 {
                assert_eq!(v.color[3], 0.0);
            } else {
                assert_eq!(v.color[3], 1.0);
            }
        }
    }

    #[test]
    fn test_rounded_rect_stays_inside_bounds() {
        let half = Vec2::new(15.0, 10.0);
        let verts = rounded_rect(Vec2::new(100.0, 50.0), half, 5.0, 0.0, WHITE, 4);
        assert_eq!(verts.len(), 4 * 5 * 3);
        for v in &verts {
            let p = pos(v) - Vec2::new(100.0, 50.0);
            assert!(p.x.abs() <= half.x + 1e-3);
            assert!(p.y.abs() <= half.y + 1e-3);
        }
    }

    #[test]
    fn test_rounded_rect_rotation_preserves_distance() {
        let half = Vec2::new(15.0, 10.0);
        let flat = rounded_rect(Vec2::ZERO, half, 3.0, 0.0, WHITE, 3);
        let tilted = rounded_rect(Vec2::ZERO, half, 3.0, 0.08, WHITE, 3);
        for (a, b) in flat.iter().zip(tilted.iter()) {
            assert!((pos(a).length() - pos(b).length()).abs() < 1e-3);
        }
        assert_ne!(flat, tilted);
    }

    #[test]
    fn test_corner_radius_is_capped() {
        // A radius larger than the half height collapses the straight sides
        let verts = rounded_rect(Vec2::ZERO, Vec2::new(20.0, 4.0), 50.0, 0.0, WHITE, 2);
        for v in &verts {
            assert!(pos(v).y.abs() <= 4.0 + 1e-3);
        }
    }

    #[test]
    fn test_line_quad_width() {
        let verts = line(Vec2::new(0.0, 0.0), Vec2::new(0.0, 100.0), 2.0, WHITE);
        assert_eq!(verts.len(), 6);
        for v in &verts {
            assert!((v.position[0].abs() - 1.0).abs() < 1e-5);
        }
    }
}
