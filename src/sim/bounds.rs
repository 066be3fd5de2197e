//! Axis-aligned box geometry for sprites and the play area
//!
//! Coordinates follow the screen convention used by the whole crate: the
//! origin is the bottom-left corner and y grows upward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HEIGHT, WIDTH};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Bottom-left corner
    pub min: Vec2,
    /// Top-right corner
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y, "inverted box");
        Self { min, max }
    }

    /// Box of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    /// The visible play area
    pub fn play_area() -> Self {
        Self::new(Vec2::ZERO, Vec2::new(WIDTH, HEIGHT))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True if the boxes share a region of positive area.
    ///
    /// Touching edges do not count, so a player skimming an obstacle
    /// survives.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// True if any part of this box is still inside `area`
    pub fn intersects_area(&self, area: &Aabb) -> bool {
        // Most of the time the player is on screen, so test the exits first
        // and bail on the first one that holds.
        !(self.right() <= area.left()
            || self.left() >= area.right()
            || self.top() <= area.bottom()
            || self.bottom() >= area.top())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_requires_positive_area() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let crossing = Aabb::new(Vec2::new(9.0, 9.0), Vec2::new(20.0, 20.0));

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
        assert!(crossing.overlaps(&a));
    }

    #[test]
    fn test_partially_visible_box_is_in_area() {
        let area = Aabb::play_area();
        let poking_out_top = Aabb::from_center(Vec2::new(100.0, HEIGHT), Vec2::splat(40.0));
        assert!(poking_out_top.intersects_area(&area));

        let fully_above = Aabb::from_center(Vec2::new(100.0, HEIGHT + 20.0), Vec2::splat(40.0));
        assert!(!fully_above.intersects_area(&area));

        let fully_left = Aabb::from_center(Vec2::new(-20.0, 300.0), Vec2::splat(40.0));
        assert!(!fully_left.intersects_area(&area));
    }

    #[test]
    fn test_from_center() {
        let b = Aabb::from_center(Vec2::new(100.0, 300.0), Vec2::new(50.0, 40.0));
        assert_eq!(b.left(), 75.0);
        assert_eq!(b.right(), 125.0);
        assert_eq!(b.bottom(), 280.0);
        assert_eq!(b.top(), 320.0);
        assert_eq!(b.center(), Vec2::new(100.0, 300.0));
        assert_eq!(b.size(), Vec2::new(50.0, 40.0));
    }
}
