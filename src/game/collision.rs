//! Collision Detection
//!
//! Axis-aligned overlap queries and platform penetration resolution. Every
//! system goes through these helpers, so swapping the linear scans for a
//! spatial index or swept tests only touches this file.

use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

/// Side of a platform a body collided with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionSide {
    /// No overlap, or overlap with no identifiable entry side
    None,
    /// Landed on top
    Top,
    /// Hit the underside
    Bottom,
    /// Ran into the platform's left face
    Left,
    /// Ran into the platform's right face
    Right,
}

/// Check if two rectangles overlap (strict).
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Classify which side of `platform` the body entered from.
///
/// The entry side is inferred from the sign of `velocity` and whether the
/// leading edge sat outside the platform before `velocity` was applied.
/// Vertical entry is tested before horizontal.
pub fn penetration_side(body: &Rect, velocity: Vec2, platform: &Rect) -> CollisionSide {
    if !body.overlaps(platform) {
        return CollisionSide::None;
    }

    if velocity.y > 0.0 && body.bottom() - velocity.y <= platform.y {
        CollisionSide::Top
    } else if velocity.y < 0.0 && body.y - velocity.y >= platform.bottom() {
        CollisionSide::Bottom
    } else if velocity.x > 0.0 && body.right() - velocity.x <= platform.x {
        CollisionSide::Left
    } else if velocity.x < 0.0 && body.x - velocity.x >= platform.right() {
        CollisionSide::Right
    } else {
        CollisionSide::None
    }
}

/// Move `body` flush against `platform` on `side`.
pub fn snap_to_side(body: &mut Rect, side: CollisionSide, platform: &Rect) {
    match side {
        CollisionSide::Top => body.y = platform.y - body.height,
        CollisionSide::Bottom => body.y = platform.bottom(),
        CollisionSide::Left => body.x = platform.x - body.width,
        CollisionSide::Right => body.x = platform.right(),
        CollisionSide::None => {}
    }
}

/// Classify and push `body` out of `platform`.
///
/// Velocity is left untouched; callers zero the relevant axis.
pub fn resolve_penetration(body: &mut Rect, velocity: Vec2, platform: &Rect) -> CollisionSide {
    let side = penetration_side(body, velocity, platform);
    snap_to_side(body, side, platform);
    side
}

/// Index of the first item whose bounds overlap `target`.
///
/// Items for which `bounds` returns `None` are not hittable and are skipped.
pub fn first_overlap<T, F>(target: &Rect, items: &[T], bounds: F) -> Option<usize>
where
    F: Fn(&T) -> Option<Rect>,
{
    items
        .iter()
        .position(|item| bounds(item).is_some_and(|rect| rects_overlap(target, &rect)))
}

/// Check if a point lies strictly inside any rectangle.
pub fn point_in_any<'a, I>(point: Vec2, rects: I) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    rects.into_iter().any(|rect| rect.contains_point(point))
}

// =============================================================================
// TESTS
// =============================================================================
