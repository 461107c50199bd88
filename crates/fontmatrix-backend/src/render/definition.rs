//! In-progress and finished matrix fonts.

use fontmatrix_spec::{CharRange, FontMetrics, RendererKind};

use super::{BitPlane, MatrixBuffer, MatrixGeometry, MatrixRenderer};

/// A matrix font while its cells are being composed.
#[derive(Debug)]
pub struct Composition<'a> {
    renderer: RendererKind,
    range: CharRange,
    geometry: MatrixGeometry,
    buffer: MatrixBuffer,
    metrics: &'a FontMetrics,
    dropped: usize,
}

impl<'a> Composition<'a> {
    pub(crate) fn new(
        renderer: RendererKind,
        range: CharRange,
        geometry: MatrixGeometry,
        buffer: MatrixBuffer,
        metrics: &'a FontMetrics,
    ) -> Self {
        Self {
            renderer,
            range,
            geometry,
            buffer,
            metrics,
            dropped: 0,
        }
    }

    pub fn range(&self) -> CharRange {
        self.range
    }

    pub fn geometry(&self) -> MatrixGeometry {
        self.geometry
    }

    pub fn metrics(&self) -> &'a FontMetrics {
        self.metrics
    }

    pub fn buffer(&self) -> &MatrixBuffer {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut MatrixBuffer {
        &mut self.buffer
    }

    pub(crate) fn add_dropped(&mut self, pixels: usize) {
        self.dropped += pixels;
    }

    pub(crate) fn seal(self) -> FontDefinition<'a> {
        FontDefinition {
            renderer: self.renderer,
            first: self.range.from(),
            count: self.range.len(),
            bits_per_pixel: self.geometry.bits_per_pixel,
            matrix_width: self.geometry.matrix_width,
            matrix_height: self.geometry.matrix_height,
            matrix_pitch: self.geometry.matrix_pitch,
            glyph_bytes: self.geometry.glyph_bytes,
            clipped_pixels: self.dropped,
            buffer: self.buffer,
            metrics: self.metrics,
        }
    }
}

/// A finished matrix font, handed read-only to output writers.
#[derive(Debug, Clone)]
pub struct FontDefinition<'a> {
    /// Renderer that produced the buffer.
    pub renderer: RendererKind,
    /// First character code.
    pub first: u32,
    /// Number of glyphs.
    pub count: usize,
    /// Bits per output pixel.
    pub bits_per_pixel: u32,
    /// Encoded row width in bits.
    pub matrix_width: u32,
    /// Rows per glyph.
    pub matrix_height: u32,
    /// Bytes per encoded row.
    pub matrix_pitch: u32,
    /// Bytes per glyph.
    pub glyph_bytes: usize,
    /// "On" pixels that fell outside their cell and were dropped.
    pub clipped_pixels: usize,
    /// The composed cells.
    pub buffer: MatrixBuffer,
    /// Metrics the cells were laid out with.
    pub metrics: &'a FontMetrics,
}

impl FontDefinition<'_> {
    /// Renderer name.
    pub fn name(&self) -> &'static str {
        self.renderer.name()
    }

    /// The rendered code range.
    pub fn range(&self) -> CharRange {
        CharRange::new(self.first, self.last())
    }

    /// Last character code.
    pub fn last(&self) -> u32 {
        self.first + self.count as u32 - 1
    }

    pub fn plane(&self) -> BitPlane {
        self.renderer.plane()
    }

    /// Total buffer size in bytes.
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// The cell of a character code.
    pub fn glyph_for_code(&self, code: u32) -> Option<&[u8]> {
        if !self.range().contains(code) {
            return None;
        }
        self.buffer.glyph((code - self.first) as usize)
    }

    /// Reads encoded bit `bit_x` (0 = leftmost) of one row of one glyph.
    pub fn bit(&self, glyph: usize, row: usize, bit_x: u32) -> bool {
        self.buffer
            .row(glyph, row)
            .and_then(|r| r.get((bit_x / 8) as usize))
            .is_some_and(|b| b & (0x80 >> (bit_x % 8)) != 0)
    }

    /// Reads the slot value of cell column `x`.
    pub fn slot(&self, glyph: usize, row: usize, x: u32) -> u8 {
        self.buffer
            .row(glyph, row)
            .map_or(0, |r| self.plane().slot(r, x))
    }

    /// Largest slot value, used to normalize previews.
    pub fn max_slot(&self) -> u8 {
        ((1u16 << self.bits_per_pixel) - 1) as u8
    }

    /// BLAKE3 hex digest of the buffer.
    pub fn buffer_hash(&self) -> String {
        blake3::hash(self.buffer.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontmatrix_spec::{GlyphBitmap, GlyphPlacement, PixelSize, RasterSize};

    #[test]
    fn test_definition_accessors() {
        let mut m = FontMetrics::new("t", RasterSize::new(8, 72));
        m.cell = PixelSize::new(4, 2);
        let range = CharRange::new(48, 49);
        let placements: Vec<_> = range
            .codes()
            .map(|code| GlyphPlacement {
                code,
                bitmap: if code == 49 {
                    GlyphBitmap::from_rows(&["...*"], 0, 2, 4)
                } else {
                    GlyphBitmap::blank(4)
                },
                offset_x: 0,
                offset_y: 1,
                shift: None,
                clipped_y: false,
                clipped_x: false,
            })
            .collect();

        let def = RendererKind::TwoBit.render(&m, range, &placements).unwrap();
        assert_eq!(def.name(), "2bit");
        assert_eq!(def.last(), 49);
        assert_eq!(def.range(), range);
        assert_eq!(def.matrix_width, 8);
        assert_eq!(def.buffer_size(), 4);
        assert_eq!(def.glyph_for_code(49), Some(&[0x00, 0x02][..]));
        assert_eq!(def.glyph_for_code(50), None);
        assert!(def.bit(1, 1, 6));
        assert!(!def.bit(1, 1, 7));
        assert_eq!(def.slot(1, 1, 3), 0b10);
        assert_eq!(def.max_slot(), 3);
        assert_eq!(def.clipped_pixels, 0);
        assert_eq!(def.buffer_hash().len(), 64);
    }
}
