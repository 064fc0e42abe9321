//! Integer geometry for diagram output.
//!
//! All coordinates produced by the layout engine are whole units with the
//! origin in the top-left corner and Y growing downwards.

use serde::Serialize;

/// A point on the diagram plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Pos {
    x: i32,
    y: i32,
}

impl Pos {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }

    /// Returns the point moved by `dx`, `dy`
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Pos) -> Self {
        self.translate(other.x, other.y)
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Pos) -> Self {
        self.translate(-other.x, -other.y)
    }

    /// Returns a copy with a different x-coordinate
    pub fn with_x(self, x: i32) -> Self {
        Self { x, ..self }
    }

    /// Returns a copy with a different y-coordinate
    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    /// Sum of the absolute coordinates (the Manhattan length of the vector)
    pub fn abs_sum(self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: i32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Grid cell containing this point for a grid of `step` sized cells.
    pub fn to_cell(self, step: i32) -> Self {
        Self {
            x: self.x.div_euclid(step),
            y: self.y.div_euclid(step),
        }
    }
}

/// Designates a point of a [`Rect`] for [`Rect::to_pos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopMiddle,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Axis-aligned box with a non-negative size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// Creates a new rectangle.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when `width` or `height` is negative.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(
            width >= 0 && height >= 0,
            "Rect size must be non-negative: {width}x{height}"
        );
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the given size at the origin.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        self.y
    }

    pub fn width(self) -> i32 {
        self.width
    }

    pub fn height(self) -> i32 {
        self.height
    }

    /// X of the right edge
    pub fn right(self) -> i32 {
        self.x + self.width
    }

    /// Y of the bottom edge
    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner
    pub fn origin(self) -> Pos {
        Pos::new(self.x, self.y)
    }

    pub fn to_pos(self, corner: Corner) -> Pos {
        match corner {
            Corner::TopLeft => Pos::new(self.x, self.y),
            Corner::TopMiddle => Pos::new(self.x + self.width / 2, self.y),
            Corner::TopRight => Pos::new(self.right(), self.y),
            Corner::BottomLeft => Pos::new(self.x, self.bottom()),
            Corner::BottomRight => Pos::new(self.right(), self.bottom()),
        }
    }

    /// Returns the rectangle moved by `dx`, `dy`
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Returns the rectangle with its origin moved to `pos`
    pub fn with_origin(self, pos: Pos) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            ..self
        }
    }

    pub fn with_x(self, x: i32) -> Self {
        Self { x, ..self }
    }

    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    pub fn with_width(self, width: i32) -> Self {
        debug_assert!(width >= 0, "Rect width must be non-negative: {width}");
        Self { width, ..self }
    }

    pub fn with_height(self, height: i32) -> Self {
        debug_assert!(height >= 0, "Rect height must be non-negative: {height}");
        Self { height, ..self }
    }

    /// Grows the rectangle upwards by `amount`, keeping the bottom edge in place.
    pub fn extend_up(self, amount: i32) -> Self {
        Self {
            y: self.y - amount,
            height: self.height + amount,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_rect_corners() {
        let rect = Rect::new(10, 20, 30, 40);

        assert_eq!(rect.to_pos(Corner::TopLeft), Pos::new(10, 20));
        assert_eq!(rect.to_pos(Corner::TopMiddle), Pos::new(25, 20));
        assert_eq!(rect.to_pos(Corner::TopRight), Pos::new(40, 20));
        assert_eq!(rect.to_pos(Corner::BottomLeft), Pos::new(10, 60));
        assert_eq!(rect.to_pos(Corner::BottomRight), Pos::new(40, 60));
    }

    #[test]
    fn test_extend_up_keeps_bottom() {
        let rect = Rect::new(0, 50, 10, 30).extend_up(25);

        assert_eq!(rect.y(), 25);
        assert_eq!(rect.height(), 55);
        assert_eq!(rect.bottom(), 80);
    }

    #[test]
    fn test_to_cell_rounds_down_for_negative() {
        assert_eq!(Pos::new(-1, 29).to_cell(30), Pos::new(-1, 0));
        assert_eq!(Pos::new(-30, 30).to_cell(30), Pos::new(-1, 1));
        assert_eq!(Pos::new(-31, 59).to_cell(30), Pos::new(-2, 1));
    }

    #[test]
    fn test_abs_sum() {
        assert_eq!(Pos::new(-3, 4).abs_sum(), 7);
        assert_eq!(Pos::new(3, 4).sub_point(Pos::new(5, 5)), Pos::new(-2, -1));
    }

    proptest! {
        #[test]
        fn prop_translate_round_trip(x in -1000i32..1000, y in -1000i32..1000, dx in -500i32..500, dy in -500i32..500) {
            let rect = Rect::new(x, y, 10, 10);
            prop_assert_eq!(rect.translate(dx, dy).translate(-dx, -dy), rect);
        }

        #[test]
        fn prop_cell_contains_point(x in -1000i32..1000, y in -1000i32..1000, step in 1i32..64) {
            let cell = Pos::new(x, y).to_cell(step);
            prop_assert!(cell.x() * step <= x && x < (cell.x() + 1) * step);
            prop_assert!(cell.y() * step <= y && y < (cell.y() + 1) * step);
        }
    }
}
