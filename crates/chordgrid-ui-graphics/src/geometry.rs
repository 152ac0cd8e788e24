//! Integer pixel rectangles, sizes and insets.

/// A rectangle in pixel coordinates, stored as edges.
///
/// `right` and `bottom` are exclusive, so a rect with `left == right` is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of `size` pixels with its top-left corner at (`left`, `top`).
    pub const fn square(left: i32, top: i32, size: i32) -> Self {
        Self::new(left, top, left + size, top + size)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Moves the rect by (`dx`, `dy`).
    #[must_use]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Shrinks every edge towards the centre by `amount`.
    #[must_use]
    pub const fn inset(self, amount: i32) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    pub const fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntSize {
    pub width: i32,
    pub height: i32,
}

impl IntSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Bounds of a viewport of this size anchored at the origin.
    pub const fn to_rect(self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Padding on each side of a container, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same padding on all four sides.
    pub const fn uniform(all: i32) -> Self {
        Self::new(all, all, all, all)
    }

    /// Padding on the left and right only.
    pub const fn horizontal(left: i32, right: i32) -> Self {
        Self::new(left, 0, right, 0)
    }

    pub const fn horizontal_sum(&self) -> i32 {
        self.left + self.right
    }

    pub const fn vertical_sum(&self) -> i32 {
        self.top + self.bottom
    }
}
