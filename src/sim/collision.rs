//! Collision detection
//!
//! Axis-aligned overlap with a symmetric margin inset on both boxes. The
//! margin controls hitbox forgiveness: obstacle checks use a deeper inset
//! than coin checks so near-misses stay misses.

use glam::Vec2;

use crate::consts::{COIN_MARGIN, OBSTACLE_MARGIN};

/// An axis-aligned box in canvas pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }
}

/// Which margin rule to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Coin,
    Obstacle,
}

impl CollisionKind {
    /// Inward inset applied to both boxes before the overlap test
    pub fn margin(self) -> f32 {
        match self {
            CollisionKind::Coin => COIN_MARGIN,
            CollisionKind::Obstacle => OBSTACLE_MARGIN,
        }
    }
}

/// True iff the margin-inset boxes overlap on both axes.
///
/// Pure and symmetric in its box arguments. Strict inequalities, so boxes
/// that merely touch after the inset do not collide.
pub fn boxes_overlap(a: &Aabb, b: &Aabb, kind: CollisionKind) -> bool {
    let m = kind.margin();

    a.pos.x + m < b.pos.x + b.size.x - m
        && a.pos.x + a.size.x - m > b.pos.x + m
        && a.pos.y + m < b.pos.y + b.size.y - m
        && a.pos.y + a.size.y - m > b.pos.y + m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aabb(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_clear_overlap_hits() {
        let a = aabb(0.0, 0.0, 50.0, 60.0);
        let b = aabb(10.0, 10.0, 50.0, 60.0);
        assert!(boxes_overlap(&a, &b, CollisionKind::Coin));
        assert!(boxes_overlap(&a, &b, CollisionKind::Obstacle));
    }

    #[test]
    fn test_separated_boxes_miss() {
        let a = aabb(0.0, 0.0, 50.0, 60.0);
        let b = aabb(200.0, 0.0, 50.0, 60.0);
        assert!(!boxes_overlap(&a, &b, CollisionKind::Coin));
    }

    #[test]
    fn test_symmetric() {
        let a = aabb(0.0, 0.0, 50.0, 60.0);
        for (bx, by) in [(-30.0, 5.0), (25.0, 40.0), (49.0, -59.0), (80.0, 0.0)] {
            let b = aabb(bx, by, 40.0, 40.0);
            for kind in [CollisionKind::Coin, CollisionKind::Obstacle] {
                assert_eq!(
                    boxes_overlap(&a, &b, kind),
                    boxes_overlap(&b, &a, kind),
                    "swap must not change the result ({bx}, {by})"
                );
            }
        }
    }

    #[test]
    fn test_margin_forgives_shallow_overlap() {
        // 25px of raw overlap on x: survives the coin inset (10+10),
        // not the obstacle inset (15+15).
        let a = aabb(0.0, 0.0, 50.0, 60.0);
        let b = aabb(25.0, 0.0, 50.0, 60.0); // 25px overlap on x
        assert!(boxes_overlap(&a, &b, CollisionKind::Coin));
        assert!(!boxes_overlap(&a, &b, CollisionKind::Obstacle));
    }

    #[test]
    fn test_edge_touch_after_inset_misses() {
        // Overlap on x exactly equals the combined coin inset (20px):
        // the inset boxes touch edge-to-edge, strict inequality says miss.
        let a = aabb(0.0, 0.0, 50.0, 60.0);
        let b = aabb(30.0, 0.0, 50.0, 60.0);
        assert!(!boxes_overlap(&a, &b, CollisionKind::Coin));
    }

    #[test]
    fn test_overlap_on_one_axis_only_misses() {
        let a = aabb(0.0, 0.0, 50.0, 60.0);
        let b = aabb(10.0, 300.0, 50.0, 60.0); // x overlaps, y far away
        assert!(!boxes_overlap(&a, &b, CollisionKind::Coin));
    }
}
