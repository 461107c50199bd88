//! Glyph sources: where glyph bitmaps come from.
//!
//! A source is a single stateful rasterization context. [`GlyphSource::set_size`]
//! fixes the size for every following query, and each call to
//! [`GlyphSource::rasterize`] hands back an owned bitmap, so nothing has to be
//! copied out of the source before the next query.

mod font_file;
mod table;

pub use self::font_file::FontdueSource;
pub use self::table::TableGlyphSource;

use fontmatrix_spec::{BackendError, GlyphBitmap, RasterSize};
use thiserror::Error;

/// Errors raised by a glyph source.
#[derive(Debug, Error)]
pub enum GlyphSourceError {
    /// The font data could not be loaded.
    #[error("unable to load font: {0}")]
    Load(String),

    /// The font file could not be read.
    #[error("unable to read font file: {0}")]
    Io(#[from] std::io::Error),

    /// The requested size is not usable.
    #[error("invalid raster size {points} pt at {dpi} dpi")]
    InvalidSize { points: u32, dpi: u32 },

    /// A query was made before `set_size`.
    #[error("no raster size selected")]
    NoSize,

    /// The code has no Unicode scalar value.
    #[error("character code {0} is not a valid character")]
    InvalidCode(u32),

    /// The source has no glyph for the code.
    #[error("no glyph for character code {0}")]
    MissingGlyph(u32),
}

impl BackendError for GlyphSourceError {
    fn code(&self) -> &'static str {
        match self {
            GlyphSourceError::Load(_) => "SOURCE_001",
            GlyphSourceError::Io(_) => "SOURCE_002",
            GlyphSourceError::InvalidSize { .. } => "SOURCE_003",
            GlyphSourceError::NoSize => "SOURCE_004",
            GlyphSourceError::InvalidCode(_) => "SOURCE_005",
            GlyphSourceError::MissingGlyph(_) => "SOURCE_006",
        }
    }

    fn category(&self) -> &'static str {
        "source"
    }
}

/// A rasterizer producing 1 bit/pixel glyph bitmaps at a fixed size.
pub trait GlyphSource {
    /// Fixes the rasterization size for all following queries.
    fn set_size(&mut self, size: &RasterSize) -> Result<(), GlyphSourceError>;

    /// Line-to-line advance at the current size, in pixels.
    fn line_height(&self) -> Result<i32, GlyphSourceError>;

    /// Rasterizes one character at the current size.
    fn rasterize(&mut self, code: u32) -> Result<GlyphBitmap, GlyphSourceError>;
}

impl<S: GlyphSource + ?Sized> GlyphSource for &mut S {
    fn set_size(&mut self, size: &RasterSize) -> Result<(), GlyphSourceError> {
        (**self).set_size(size)
    }

    fn line_height(&self) -> Result<i32, GlyphSourceError> {
        (**self).line_height()
    }

    fn rasterize(&mut self, code: u32) -> Result<GlyphBitmap, GlyphSourceError> {
        (**self).rasterize(code)
    }
}

impl<S: GlyphSource + ?Sized> GlyphSource for Box<S> {
    fn set_size(&mut self, size: &RasterSize) -> Result<(), GlyphSourceError> {
        (**self).set_size(size)
    }

    fn line_height(&self) -> Result<i32, GlyphSourceError> {
        (**self).line_height()
    }

    fn rasterize(&mut self, code: u32) -> Result<GlyphBitmap, GlyphSourceError> {
        (**self).rasterize(code)
    }
}
