//! Built-in pictures drawn from rectangle tables.
//!
//! There is no image decoder on the device; pictures are lists of filled
//! rectangles `(dx, dy, width, height)` relative to the picture's top-left
//! corner, one table per color.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Size;

use crate::colors::{LOGO_LIGHT, LOGO_RED};

type Rects = &'static [(i32, i32, u32, u32)];

// Chip-shaped logo, 48x48: body, 3 pins per side, light ring inside
const LOGO_BODY: Rects = &[
    (8, 8, 32, 32),
    (13, 2, 4, 6),
    (22, 2, 4, 6),
    (31, 2, 4, 6),
    (13, 40, 4, 6),
    (22, 40, 4, 6),
    (31, 40, 4, 6),
    (2, 13, 6, 4),
    (2, 22, 6, 4),
    (2, 31, 6, 4),
    (40, 13, 6, 4),
    (40, 22, 6, 4),
    (40, 31, 6, 4),
];

const LOGO_RING: Rects = &[(15, 15, 18, 4), (15, 29, 18, 4), (15, 19, 4, 10), (29, 19, 4, 10)];

// "PANEL" wordmark, letters 20x32 with 4 px spacing
const LETTER_WIDTH: i32 = 20;
const LETTER_SPACING: i32 = 4;

const LETTER_P: Rects = &[(0, 0, 5, 32), (5, 0, 12, 5), (15, 3, 5, 12), (5, 14, 12, 5)];
const LETTER_A: Rects = &[(0, 8, 5, 24), (15, 8, 5, 24), (5, 0, 10, 8), (5, 14, 10, 5)];
const LETTER_N: Rects = &[(0, 0, 5, 32), (15, 0, 5, 32), (5, 6, 4, 8), (8, 12, 4, 8), (11, 18, 4, 8)];
const LETTER_E: Rects = &[(0, 0, 5, 32), (5, 0, 15, 5), (5, 13, 12, 5), (5, 27, 15, 5)];
const LETTER_L: Rects = &[(0, 0, 5, 32), (5, 27, 15, 5)];

const WORDMARK: [Rects; 5] = [LETTER_P, LETTER_A, LETTER_N, LETTER_E, LETTER_L];

/// Pictures available to image widgets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Art {
    /// Chip logo shown in the middle of the intro.
    Logo,
    /// Product wordmark.
    Wordmark,
}

impl Art {
    pub const fn size(self) -> Size {
        match self {
            Self::Logo => Size::new(48, 48),
            Self::Wordmark => Size::new(
                (LETTER_WIDTH * WORDMARK.len() as i32 + LETTER_SPACING * (WORDMARK.len() as i32 - 1)) as u32,
                32,
            ),
        }
    }

    /// Call `f` with every rectangle of the picture and its color.
    pub fn for_each_rect<F>(
        self,
        mut f: F,
    ) where
        F: FnMut((i32, i32, u32, u32), Rgb565),
    {
        match self {
            Self::Logo => {
                LOGO_BODY.iter().for_each(|&r| f(r, LOGO_RED));
                LOGO_RING.iter().for_each(|&r| f(r, LOGO_LIGHT));
            }
            Self::Wordmark => {
                for (i, letter) in WORDMARK.iter().enumerate() {
                    let x = i as i32 * (LETTER_WIDTH + LETTER_SPACING);
                    letter.iter().for_each(|&(dx, dy, w, h)| f((x + dx, dy, w, h), LOGO_LIGHT));
                }
            }
        }
    }
}
