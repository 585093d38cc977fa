//! Rectangle collision queries
//!
//! Response is done by the tick with axis-separated resolution; these are the
//! pure tests it builds on.

use super::entity::{Entity, Rect};

/// Side of the struck rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// True iff the two entities' boxes overlap by a positive amount on both axes
#[inline]
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Which side of `b` was struck by `a`, or `None` if they do not overlap
///
/// Compares the center offset scaled by the combined half-extents against
/// the diagonals of their Minkowski sum. Not used by the tick, which resolves
/// by velocity sign instead.
pub fn impact_side(a: &Entity, b: &Entity) -> Option<Side> {
    rect_impact_side(&a.bounds(), &b.bounds())
}

/// `impact_side` on raw rectangles
pub fn rect_impact_side(a: &Rect, b: &Rect) -> Option<Side> {
    if !a.overlaps(b) {
        return None;
    }

    let delta = a.center() - b.center();
    let half_w = (a.w + b.w) / 2.0;
    let half_h = (a.h + b.h) / 2.0;
    let cross_w = half_w * delta.y;
    let cross_h = half_h * delta.x;

    let side = if cross_w > cross_h {
        if cross_w > -cross_h { Side::Bottom } else { Side::Left }
    } else if cross_w > -cross_h {
        Side::Right
    } else {
        Side::Top
    };
    Some(side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityId, EntityKind};
    use glam::Vec2;

    fn tile(x: f32, y: f32) -> Entity {
        Entity::tile(EntityId(1), EntityKind::Block, Vec2::new(x, y))
    }

    #[test]
    fn test_overlaps_requires_positive_area() {
        let a = tile(0.0, 0.0);
        assert!(overlaps(&a, &tile(16.0, 16.0)));
        assert!(!overlaps(&a, &tile(32.0, 0.0)));
        assert!(!overlaps(&a, &tile(0.0, 32.0)));
        assert!(!overlaps(&a, &tile(100.0, 100.0)));
    }

    #[test]
    fn test_impact_side_from_each_direction() {
        let b = tile(100.0, 100.0);
        assert_eq!(impact_side(&tile(100.0, 80.0), &b), Some(Side::Top));
        assert_eq!(impact_side(&tile(100.0, 120.0), &b), Some(Side::Bottom));
        assert_eq!(impact_side(&tile(80.0, 100.0), &b), Some(Side::Left));
        assert_eq!(impact_side(&tile(120.0, 100.0), &b), Some(Side::Right));
    }

    #[test]
    fn test_impact_side_none_when_apart() {
        assert_eq!(impact_side(&tile(0.0, 0.0), &tile(32.0, 0.0)), None);
    }
}
