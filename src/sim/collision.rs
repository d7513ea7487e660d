//! Collision detection for axis-aligned rectangles
//!
//! Both games only ever test box against box: enemy vs player in Dodge,
//! player vs floor and player vs goal in the platformer.

use glam::Vec2;

use super::rect::Rect;

/// Check whether two rectangles overlap
///
/// All four half-plane tests are strict, so rectangles that only share an
/// edge do not collide. A rectangle always collides with a copy of itself.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.pos.x + a.size.x > b.pos.x
        && a.pos.x < b.pos.x + b.size.x
        && a.pos.y + a.size.y > b.pos.y
        && a.pos.y < b.pos.y + b.size.y
}

/// Check whether a pointer at `point` is close enough to grab `rect`
///
/// The grab area extends `margin` units before the near edges and reaches
/// `reach` times the size past the origin on the far edges.
pub fn grabs(point: Vec2, rect: &Rect, margin: f32, reach: f32) -> bool {
    point.x >= rect.pos.x - margin
        && point.x <= rect.pos.x + rect.size.x * reach
        && point.y >= rect.pos.y - margin
        && point.y <= rect.pos.y + rect.size.y * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Color;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h, Color(0))
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        // Right edge of a == left edge of b
        assert!(!overlaps(&a, &rect(10.0, 0.0, 10.0, 10.0)));
        // Bottom edge of a == top edge of b
        assert!(!overlaps(&a, &rect(0.0, 10.0, 10.0, 10.0)));
        // Corner contact
        assert!(!overlaps(&a, &rect(10.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_one_unit_overlap_collides() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &rect(9.0, 9.0, 10.0, 10.0)));
        assert!(overlaps(&rect(9.0, 9.0, 10.0, 10.0), &a));
    }

    #[test]
    fn test_identical_bounds_collide() {
        let a = rect(3.0, 4.0, 5.0, 6.0);
        let copy = a;
        assert!(overlaps(&a, &copy));
    }

    #[test]
    fn test_containment_collides() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(40.0, 40.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_grab_tolerance() {
        let player = rect(100.0, 100.0, 15.0, 15.0);
        assert!(grabs(Vec2::new(105.0, 105.0), &player, 10.0, 1.5));
        // Margin before the near edges
        assert!(grabs(Vec2::new(90.0, 90.0), &player, 10.0, 1.5));
        assert!(!grabs(Vec2::new(89.0, 100.0), &player, 10.0, 1.5));
        // 1.5x reach on the far edges: 100 + 22.5
        assert!(grabs(Vec2::new(122.5, 122.5), &player, 10.0, 1.5));
        assert!(!grabs(Vec2::new(123.0, 110.0), &player, 10.0, 1.5));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -100i32..100, ay in -100i32..100, aw in 1i32..50, ah in 1i32..50,
            bx in -100i32..100, by in -100i32..100, bw in 1i32..50, bh in 1i32..50,
        ) {
            let a = rect(ax as f32, ay as f32, aw as f32, ah as f32);
            let b = rect(bx as f32, by as f32, bw as f32, bh as f32);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn adjacent_rects_never_collide(
            x in -100i32..100, y in -100i32..100, w in 1i32..50, h in 1i32..50, other in 1i32..50,
        ) {
            let a = rect(x as f32, y as f32, w as f32, h as f32);
            let right = rect((x + w) as f32, y as f32, other as f32, h as f32);
            let below = rect(x as f32, (y + h) as f32, w as f32, other as f32);
            prop_assert!(!overlaps(&a, &right));
            prop_assert!(!overlaps(&a, &below));
        }
    }
}
