//! Screen anchors for widget placement.

use embedded_graphics::prelude::{Point, Size};

/// Anchor of a widget relative to the screen.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Align {
    Center,
    TopLeft,
    TopMid,
    TopRight,
    BottomLeft,
    BottomMid,
    BottomRight,
    LeftMid,
    RightMid,
}

impl Align {
    /// Top-left corner of a `size` box anchored inside `parent`, shifted by `offset`.
    pub const fn resolve(
        self,
        size: Size,
        offset: Point,
        parent: Size,
    ) -> Point {
        let free_x = parent.width as i32 - size.width as i32;
        let free_y = parent.height as i32 - size.height as i32;

        let (x, y) = match self {
            Self::Center => (free_x / 2, free_y / 2),
            Self::TopLeft => (0, 0),
            Self::TopMid => (free_x / 2, 0),
            Self::TopRight => (free_x, 0),
            Self::BottomLeft => (0, free_y),
            Self::BottomMid => (free_x / 2, free_y),
            Self::BottomRight => (free_x, free_y),
            Self::LeftMid => (0, free_y / 2),
            Self::RightMid => (free_x, free_y / 2),
        };

        Point::new(x + offset.x, y + offset.y)
    }
}
