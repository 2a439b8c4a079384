//! Axis-aligned rectangle geometry for sprites and hitboxes
//!
//! Screen coordinates: origin top-left, y grows downward. A rectangle is its
//! top-left corner plus width/height.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle from a top-left position and a size
    pub fn at(pos: Vec2, w: f32, h: f32) -> Self {
        Self::new(pos.x, pos.y, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Move a local sub-rectangle (e.g. a hitbox) into world space
    pub fn offset(&self, origin: Vec2) -> Self {
        Self::new(origin.x + self.x, origin.y + self.y, self.w, self.h)
    }

    /// Grow by `pad` on every side
    pub fn padded(&self, pad: f32) -> Self {
        Self::new(
            self.x - pad,
            self.y - pad,
            self.w + pad * 2.0,
            self.h + pad * 2.0,
        )
    }

    /// Strict overlap test; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_moves_hitbox_into_world() {
        let hitbox = Rect::new(4.0, 8.0, 24.0, 20.0);
        let world = hitbox.offset(Vec2::new(100.0, 50.0));
        assert_eq!(world, Rect::new(104.0, 58.0, 24.0, 20.0));
    }

    #[test]
    fn test_padded_grows_every_side() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0).padded(10.0);
        assert_eq!(r, Rect::new(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(0.0, 0.0, 128.0, 96.0);
        assert_eq!(r.center(), Vec2::new(64.0, 48.0));
    }
}
