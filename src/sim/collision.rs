//! Collision detection for axis-aligned boxes and circles
//!
//! Players, items and platforms are boxes anchored at their top-left corner
//! (screen coordinates, +y is down). Projectiles are circles.

use serde::{Deserialize, Serialize};

use super::vector::Vector2D;

/// Axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vector2D,
    pub size: Vector2D,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            pos: Vector2D::new(x, y),
            size: Vector2D::new(width, height),
        }
    }

    pub fn from_pos_size(pos: Vector2D, size: Vector2D) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vector2D {
        self.pos + self.size / 2.0
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.pos.x - margin,
            self.pos.y - margin,
            self.size.x + margin * 2.0,
            self.size.y + margin * 2.0,
        )
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal spans intersect (strictly)
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vector2D) -> Vector2D {
        Vector2D::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// Check whether a circle touches a box (tangent contact counts)
pub fn circle_rect_overlap(center: Vector2D, radius: f64, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    (center - closest).length() <= radius
}

/// Direction a moving box came from when it ran into a static one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Falling onto the top surface
    FromAbove,
    /// Rising into the underside
    FromBelow,
    /// Horizontal contact; resolve by pushing out past the left edge
    LeftSide,
    /// Horizontal contact; resolve by pushing out past the right edge
    RightSide,
}

/// Classify an overlap between a moving box and a static obstacle
///
/// Returns `None` when the boxes do not overlap. Vertical approach wins when
/// the mover's velocity and position agree on it; everything else is a side
/// hit, pushed toward whichever outer edge is nearer to the mover's centre.
pub fn classify_contact(mover: &Rect, velocity: Vector2D, obstacle: &Rect) -> Option<Contact> {
    if !mover.overlaps(obstacle) {
        return None;
    }

    if velocity.y > 0.0 && mover.top() < obstacle.top() {
        return Some(Contact::FromAbove);
    }
    if velocity.y < 0.0 && mover.top() > obstacle.top() {
        return Some(Contact::FromBelow);
    }

    if mover.center().x < obstacle.center().x {
        Some(Contact::LeftSide)
    } else {
        Some(Contact::RightSide)
    }
}
