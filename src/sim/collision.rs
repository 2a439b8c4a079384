//! Collision primitives
//!
//! The two games deliberately use different tests: pickups (fruit, hearts)
//! are circular distance checks between centers, while obstacles are
//! rectangle overlaps between hitboxes.

use glam::Vec2;

use super::rect::Rect;
use crate::distance;

/// Circular pickup test: centers strictly closer than `radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    distance(a, b) < radius
}

/// True if `rect` overlaps any of `others`
pub fn overlaps_any<'a>(rect: &Rect, others: impl IntoIterator<Item = &'a Rect>) -> bool {
    others.into_iter().any(|other| rect.intersects(other))
}

/// True if `point` is closer than `min_dist` to any of `others`
pub fn crowds_any(point: Vec2, others: impl IntoIterator<Item = Vec2>, min_dist: f32) -> bool {
    others.into_iter().any(|other| distance(point, other) < min_dist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_radius_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(within_radius(a, Vec2::new(34.9, 0.0), 35.0));
        assert!(!within_radius(a, Vec2::new(35.0, 0.0), 35.0));
        // Diagonal 3-4-5
        assert!(within_radius(a, Vec2::new(3.0, 4.0), 5.1));
    }

    #[test]
    fn test_overlaps_any() {
        let walls = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(50.0, 50.0, 10.0, 10.0),
        ];
        assert!(overlaps_any(&Rect::new(55.0, 55.0, 2.0, 2.0), &walls));
        assert!(!overlaps_any(&Rect::new(20.0, 20.0, 10.0, 10.0), &walls));
        let none: [Rect; 0] = [];
        assert!(!overlaps_any(&Rect::new(20.0, 20.0, 10.0, 10.0), &none));
    }

    #[test]
    fn test_crowds_any() {
        let others = [Vec2::new(100.0, 100.0)];
        assert!(crowds_any(Vec2::new(130.0, 100.0), others, 50.0));
        assert!(!crowds_any(Vec2::new(150.0, 100.0), others, 50.0));
    }
}
