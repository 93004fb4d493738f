//! Planar helpers on top of glam used by the spine solver and anatomy.

pub use glam::Vec2;

/// Point offset from `base` along `base_angle + angle_offset` by
/// `length + length_offset`.
///
/// Every anatomical vertex is placed with this, anchored to a joint's local frame.
#[inline]
pub fn vertex_at(
    base: Vec2,
    base_angle: f32,
    length: f32,
    angle_offset: f32,
    length_offset: f32,
) -> Vec2 {
    base + Vec2::from_angle(base_angle + angle_offset) * (length + length_offset)
}

/// Signed difference `a2 - a1` wrapped into (-PI, PI].
#[inline]
pub fn relative_angle_diff(a1: f32, a2: f32) -> f32 {
    let delta = a2 - a1;
    delta.sin().atan2(delta.cos())
}

/// Heading of a direction vector. The zero vector yields 0.
#[inline]
pub fn heading(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_vertex_at_rotates_and_scales() {
        let p = vertex_at(Vec2::new(10.0, 5.0), 0.0, 4.0, FRAC_PI_2, 0.0);
        assert!(p.distance(Vec2::new(10.0, 9.0)) < EPSILON, "got {:?}", p);

        // Length offset shortens the reach
        let p = vertex_at(Vec2::ZERO, PI, 24.0, 0.0, -18.0);
        assert!(p.distance(Vec2::new(-6.0, 0.0)) < EPSILON, "got {:?}", p);
    }

    #[test]
    fn test_relative_angle_diff_wraps() {
        let d = relative_angle_diff(PI - 0.01, -PI + 0.01);
        assert!((d - 0.02).abs() < EPSILON, "expected ~0.02, got {}", d);

        let d = relative_angle_diff(-PI + 0.01, PI - 0.01);
        assert!((d + 0.02).abs() < EPSILON, "expected ~-0.02, got {}", d);
    }

    #[test]
    fn test_relative_angle_diff_plain() {
        assert!((relative_angle_diff(0.0, 1.0) - 1.0).abs() < EPSILON);
        assert!((relative_angle_diff(1.0, 0.0) + 1.0).abs() < EPSILON);
        assert!(relative_angle_diff(0.3, 0.3).abs() < EPSILON);
    }

    #[test]
    fn test_heading_of_zero_is_zero() {
        assert_eq!(heading(Vec2::ZERO), 0.0);
        assert!((heading(Vec2::new(-1.0, 0.0)) - PI).abs() < EPSILON);
    }
}
