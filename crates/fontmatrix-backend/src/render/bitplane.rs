//! N-bit pixel packing.
//!
//! Cell column `x` occupies bits `x * N .. x * N + N` of its row, counted
//! from the most significant bit of the first byte. A set source pixel ORs a
//! fixed "on" pattern into that slot; nothing is ever cleared.

use fontmatrix_spec::{GlyphPlacement, PixelSize};

use super::buffer::MatrixBuffer;
use super::RenderError;

/// Bit layout of one output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPlane {
    /// Bits per pixel; must divide 8.
    pub bits: u32,
    /// Value written into a slot for an "on" pixel, right-aligned.
    pub on: u8,
}

impl BitPlane {
    /// Byte index and mask addressing cell column `x`.
    #[inline]
    pub fn locate(&self, x: u32) -> (usize, u8) {
        let bit = x * self.bits;
        let shift = 8 - self.bits - (bit % 8);
        ((bit / 8) as usize, self.on << shift)
    }

    /// Reads the slot value of cell column `x` from a packed row.
    pub fn slot(&self, row: &[u8], x: u32) -> u8 {
        let bit = x * self.bits;
        let shift = 8 - self.bits - (bit % 8);
        let slot_mask = ((1u16 << self.bits) - 1) as u8;
        row.get((bit / 8) as usize)
            .map_or(0, |b| (b >> shift) & slot_mask)
    }
}

/// Composes one placement into glyph cell `index`.
///
/// Source pixels landing outside the cell are dropped and counted; the
/// return value is the number of dropped "on" pixels.
pub fn compose_glyph(
    buffer: &mut MatrixBuffer,
    index: usize,
    placement: &GlyphPlacement,
    cell: PixelSize,
    plane: BitPlane,
) -> Result<usize, RenderError> {
    let bitmap = &placement.bitmap;
    let mut dropped = 0;

    for gy in 0..bitmap.height {
        let y = placement.offset_y + gy as i32;
        for gx in 0..bitmap.width {
            if !bitmap.pixel(gx, gy) {
                continue;
            }
            let x = placement.offset_x + gx as i32;
            if x < 0 || y < 0 || x >= cell.width as i32 || y >= cell.height as i32 {
                dropped += 1;
                continue;
            }
            let (byte, mask) = plane.locate(x as u32);
            buffer.set_bits(index, y as usize, byte, mask)?;
        }
    }
    Ok(dropped)
}
