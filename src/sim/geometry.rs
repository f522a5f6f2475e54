//! Axis-aligned rectangles and perspective helpers
//!
//! Every collision in the game is a rectangle overlap test; every entity
//! that travels down the highway shrinks or grows with the same depth ramp.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEPTH_SCALE_MAX_Y, DEPTH_SCALE_MIN_Y};
use crate::lerp;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    /// Build from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// True iff the rectangles intersect.
///
/// Strict inequalities on all four sides: rectangles that only share an edge
/// do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Normalized progress of `y` from `from` to `to`, clamped to [0, 1]
#[inline]
pub fn progress(y: f32, from: f32, to: f32) -> f32 {
    if to == from {
        return 1.0;
    }
    ((y - from) / (to - from)).clamp(0.0, 1.0)
}

/// Linear size ramp with simulated distance from the viewer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthScale {
    pub min_scale: f32,
    pub max_scale: f32,
}

impl DepthScale {
    pub const fn new(min_scale: f32, max_scale: f32) -> Self {
        Self {
            min_scale,
            max_scale,
        }
    }

    /// Scale factor at screen height `y`, clamped to [min_scale, max_scale]
    pub fn at(&self, y: f32) -> f32 {
        let t = (y - DEPTH_SCALE_MIN_Y) / (DEPTH_SCALE_MAX_Y - DEPTH_SCALE_MIN_Y);
        lerp(self.min_scale, self.max_scale, t).clamp(self.min_scale, self.max_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the right edge
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        // Shares the bottom edge
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        // Shares only a corner
        let corner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&a, &corner));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 2.0, 2.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_progress_clamps() {
        assert_eq!(progress(230.0, 230.0, 550.0), 0.0);
        assert_eq!(progress(550.0, 230.0, 550.0), 1.0);
        assert_eq!(progress(100.0, 230.0, 550.0), 0.0);
        assert_eq!(progress(900.0, 230.0, 550.0), 1.0);
        assert!((progress(390.0, 230.0, 550.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_depth_scale_ramp() {
        let scale = DepthScale::new(0.2, 1.1);
        assert!((scale.at(DEPTH_SCALE_MIN_Y) - 0.2).abs() < 1e-6);
        assert!((scale.at(DEPTH_SCALE_MAX_Y) - 1.1).abs() < 1e-6);
        assert!((scale.at(0.0) - 0.2).abs() < 1e-6);
        assert!((scale.at(1000.0) - 1.1).abs() < 1e-6);
        let mid = (DEPTH_SCALE_MIN_Y + DEPTH_SCALE_MAX_Y) / 2.0;
        assert!((scale.at(mid) - 0.65).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.0f32..100.0, ah in 0.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.0f32..100.0, bh in 0.0f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn depth_scale_stays_in_bounds(y in -2000.0f32..2000.0) {
            let scale = DepthScale::new(0.3, 1.2);
            let s = scale.at(y);
            prop_assert!((0.3..=1.2).contains(&s));
        }
    }
}
