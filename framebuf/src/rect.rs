//! Integer rectangles — player, obstacles, and draw regions.

/// An axis-aligned rectangle with integer pixel coordinates.
///
/// Coordinates may be negative (obstacles scroll past the left edge before
/// they are culled); width and height are always positive in practice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// One past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Half-open overlap on both axes.  Rectangles that merely touch along
    /// an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
