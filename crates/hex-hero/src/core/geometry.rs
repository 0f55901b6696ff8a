//! Hexagon geometry shared by drawing and hit testing.
//!
//! Vertices sit at angles `i * 60°` with no rotation offset. Drawing and hit
//! testing both go through [`hexagon_vertices`], so the visible outline and
//! the hoverable area can only disagree if callers pass different radii.

use std::f32::consts::TAU;
use glam::Vec2;

/// Number of sides (and vertices) of a sprite outline.
pub const HEX_SIDES: usize = 6;

/// The six vertices of a hexagon, in order, starting at angle 0.
pub fn hexagon_vertices(center: Vec2, radius: f32) -> [Vec2; HEX_SIDES] {
    let step = TAU / HEX_SIDES as f32;
    std::array::from_fn(|i| {
        let angle = i as f32 * step;
        center + Vec2::new(angle.cos(), angle.sin()) * radius
    })
}

/// Whether `point` lies inside the hexagon at `center` with `radius`.
///
/// Rejects against the bounding circle first, then runs an edge-crossing
/// parity test. The test runs in hexagon-local space so that large
/// coordinates do not eat into float precision near the center.
///
/// `radius` must be the effective radius (base radius times current scale)
/// that was last drawn.
pub fn is_point_in_hexagon(point: Vec2, center: Vec2, radius: f32) -> bool {
    let p = point - center;
    if p.length_squared() > radius * radius {
        return false;
    }

    let verts = hexagon_vertices(Vec2::ZERO, radius);
    let mut inside = false;
    for i in 0..HEX_SIDES {
        let a = verts[i];
        let b = verts[(i + 1) % HEX_SIDES];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::Rng;

    #[test]
    fn six_vertices_on_the_circle() {
        let center = Vec2::new(100.0, 50.0);
        let verts = hexagon_vertices(center, 20.0);
        assert_eq!(verts.len(), 6);
        for v in verts {
            assert!(((v - center).length() - 20.0).abs() < 1e-4);
        }
    }

    #[test]
    fn first_vertex_is_at_angle_zero() {
        let verts = hexagon_vertices(Vec2::new(10.0, 10.0), 5.0);
        assert_eq!(verts[0], Vec2::new(15.0, 10.0));
        assert!((verts[3].x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn center_is_always_inside() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let center = Vec2::new(rng.range(-2000.0, 2000.0), rng.range(-2000.0, 2000.0));
            let radius = rng.range(0.01, 300.0);
            assert!(
                is_point_in_hexagon(center, center, radius),
                "center {center:?} radius {radius}"
            );
        }
    }

    #[test]
    fn outside_bounding_circle_is_never_inside() {
        let mut rng = Rng::new(99);
        for _ in 0..1000 {
            let center = Vec2::new(rng.range(0.0, 1000.0), rng.range(0.0, 1000.0));
            let radius = rng.range(1.0, 120.0);
            let angle = rng.range(0.0, TAU);
            let distance = radius * rng.range(1.001, 5.0);
            let point = center + Vec2::new(angle.cos(), angle.sin()) * distance;
            assert!(!is_point_in_hexagon(point, center, radius));
        }
    }

    #[test]
    fn corners_of_bounding_circle_gap_are_outside() {
        // Straight up from the center, the flat top edge sits at r*sin(60°),
        // below the bounding circle.
        let center = Vec2::new(0.0, 0.0);
        let radius = 10.0;
        let apothem = radius * (TAU / 6.0).sin();
        assert!(is_point_in_hexagon(Vec2::new(0.0, apothem - 0.1), center, radius));
        assert!(!is_point_in_hexagon(Vec2::new(0.0, apothem + 0.1), center, radius));
    }

    #[test]
    fn hit_area_tracks_effective_radius() {
        let center = Vec2::new(50.0, 50.0);
        let point = Vec2::new(62.0, 50.0);
        assert!(!is_point_in_hexagon(point, center, 10.0));
        assert!(is_point_in_hexagon(point, center, 10.0 * 1.5));
    }
}
