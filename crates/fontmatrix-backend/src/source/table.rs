//! In-memory glyph source for callers that already own their bitmaps.

use std::collections::BTreeMap;

use fontmatrix_spec::{GlyphBitmap, RasterSize};

use super::{GlyphSource, GlyphSourceError};

/// A fixed table of glyph bitmaps keyed by character code.
///
/// The table ignores the requested size; every query returns the stored
/// bitmap. Codes without an entry come back blank unless the table is
/// strict.
#[derive(Debug, Clone)]
pub struct TableGlyphSource {
    glyphs: BTreeMap<u32, GlyphBitmap>,
    line_height: i32,
    blank_advance: i32,
    strict: bool,
    size: Option<RasterSize>,
}

impl TableGlyphSource {
    /// Creates an empty table with the given line height.
    pub fn new(line_height: i32) -> Self {
        Self {
            glyphs: BTreeMap::new(),
            line_height,
            blank_advance: 0,
            strict: false,
            size: None,
        }
    }

    /// Adds or replaces the glyph for `code`.
    pub fn with_glyph(mut self, code: u32, glyph: GlyphBitmap) -> Self {
        self.insert(code, glyph);
        self
    }

    /// Adds or replaces the glyph for `code`.
    pub fn insert(&mut self, code: u32, glyph: GlyphBitmap) {
        self.glyphs.insert(code, glyph);
    }

    /// Advance reported for codes without an entry.
    pub fn with_blank_advance(mut self, advance: i32) -> Self {
        self.blank_advance = advance;
        self
    }

    /// Makes missing codes fail instead of coming back blank.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Size last selected with `set_size`.
    pub fn size(&self) -> Option<RasterSize> {
        self.size
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphSource for TableGlyphSource {
    fn set_size(&mut self, size: &RasterSize) -> Result<(), GlyphSourceError> {
        if size.points == 0 || size.dpi == 0 {
            return Err(GlyphSourceError::InvalidSize {
                points: size.points,
                dpi: size.dpi,
            });
        }
        self.size = Some(*size);
        Ok(())
    }

    fn line_height(&self) -> Result<i32, GlyphSourceError> {
        self.size.ok_or(GlyphSourceError::NoSize)?;
        Ok(self.line_height)
    }

    fn rasterize(&mut self, code: u32) -> Result<GlyphBitmap, GlyphSourceError> {
        self.size.ok_or(GlyphSourceError::NoSize)?;
        match self.glyphs.get(&code) {
            Some(glyph) => Ok(glyph.clone()),
            None if self.strict => Err(GlyphSourceError::MissingGlyph(code)),
            None => Ok(GlyphBitmap::blank(self.blank_advance)),
        }
    }
}
