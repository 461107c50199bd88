//! Per-character bitmaps and their placement inside the shared cell.
//!
//! ```text
//!     offset_x
//!    |<->|
//!    |___|___________|______
//!    |               | ^
//!    |               | | offset_y
//!    |               |_v_____________
//!    |   ..***.***   |             ^
//!    |   .*...*...   |             |
//!    |   .****....   |             | height
//!   _|   .******..   |__(origin)   |
//!    |   *......*.   |             |
//!    |   .*****...   |_____________v_
//!    |_______________|
//!        |<----->|
//!          width
//! ```

use serde::{Deserialize, Serialize};

/// A 1 bit/pixel glyph bitmap as delivered by a glyph source.
///
/// Rows are `pitch` bytes wide, most significant bit first. A blank glyph
/// (space, control codes) has zero size and an empty buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphBitmap {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Bytes per bitmap row.
    pub pitch: u32,
    /// `pitch * height` bytes, or empty.
    pub buffer: Vec<u8>,
    /// Horizontal distance from the pen position to the left ink edge.
    pub left_bearing: i32,
    /// Vertical distance from the baseline up to the top ink row.
    pub top_bearing: i32,
    /// Horizontal advance in pixels.
    pub advance: i32,
    /// Vertical advance in pixels.
    pub vertical_advance: i32,
}

impl GlyphBitmap {
    /// Creates a blank glyph with the given advance.
    pub fn blank(advance: i32) -> Self {
        Self {
            advance,
            ..Self::default()
        }
    }

    /// Builds a glyph from rows of `'*'`/`'#'` (on) and anything else (off).
    ///
    /// All rows are padded to the longest one.
    pub fn from_rows(rows: &[&str], left_bearing: i32, top_bearing: i32, advance: i32) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let height = if width == 0 { 0 } else { rows.len() as u32 };
        let pitch = width.div_ceil(8);
        let mut buffer = vec![0u8; (pitch * height) as usize];
        for (y, row) in rows.iter().enumerate().take(height as usize) {
            for (x, c) in row.chars().enumerate() {
                if c == '*' || c == '#' {
                    buffer[y * pitch as usize + x / 8] |= 0x80 >> (x & 7);
                }
            }
        }
        Self {
            width,
            height,
            pitch,
            buffer,
            left_bearing,
            top_bearing,
            advance,
            vertical_advance: 0,
        }
    }

    /// Creates a glyph of the given size with every pixel on.
    pub fn solid(width: u32, height: u32, left_bearing: i32, top_bearing: i32) -> Self {
        let pitch = width.div_ceil(8);
        let mut buffer = vec![0u8; (pitch * height) as usize];
        for y in 0..height as usize {
            for x in 0..width as usize {
                buffer[y * pitch as usize + x / 8] |= 0x80 >> (x & 7);
            }
        }
        Self {
            width,
            height,
            pitch,
            buffer,
            left_bearing,
            top_bearing,
            advance: width as i32,
            vertical_advance: 0,
        }
    }

    /// Sets the vertical advance.
    pub fn with_vertical_advance(mut self, vertical_advance: i32) -> Self {
        self.vertical_advance = vertical_advance;
        self
    }

    /// Returns true if the glyph has no pixels.
    pub fn is_blank(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Reads one pixel; out-of-range coordinates read as off.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = (y * self.pitch + x / 8) as usize;
        self.buffer
            .get(idx)
            .is_some_and(|b| b & (0x80 >> (x & 7)) != 0)
    }

    /// Ink extent below the baseline, never negative.
    pub fn descent(&self) -> i32 {
        (self.height as i32 - self.top_bearing).max(0)
    }

    /// Ink extent above the baseline, never negative.
    pub fn ascent(&self) -> i32 {
        (self.top_bearing.max(self.height as i32) - self.descent()).max(0)
    }

    /// Bitmap size.
    pub fn size(&self) -> crate::PixelSize {
        crate::PixelSize::new(self.width, self.height)
    }
}

/// Vertical adjustment applied by the clipping policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalShift {
    /// The glyph started above the cell.
    MovedDown { from: i32 },
    /// The glyph ended below the cell.
    MovedUp { from: i32 },
}

/// A glyph bitmap positioned inside the shared cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// Character code.
    pub code: u32,
    /// The source bitmap.
    pub bitmap: GlyphBitmap,
    /// Column of the bitmap's left edge inside the cell.
    pub offset_x: i32,
    /// Row of the bitmap's top edge inside the cell.
    pub offset_y: i32,
    /// Vertical shift applied while clamping, if any.
    pub shift: Option<VerticalShift>,
    /// The bitmap does not fit vertically and is truncated when rendered.
    pub clipped_y: bool,
    /// The bitmap does not fit horizontally and is truncated when rendered.
    pub clipped_x: bool,
}

impl GlyphPlacement {
    pub fn width(&self) -> u32 {
        self.bitmap.width
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height
    }

    pub fn advance(&self) -> i32 {
        self.bitmap.advance
    }

    /// Returns true if either axis is clipped.
    pub fn is_clipped(&self) -> bool {
        self.clipped_x || self.clipped_y
    }
}
