//! Matrix renderers.
//!
//! A renderer turns the placements of one character range into a
//! [`FontDefinition`]: one fixed-size cell per glyph, each pixel packed into
//! N bits. Rendering runs in three steps:
//!
//! 1. [`MatrixRenderer::init`] computes the output geometry and allocates a
//!    zero-filled [`Composition`].
//! 2. [`MatrixRenderer::compose`] ORs every placement into its cell.
//! 3. [`MatrixRenderer::finish`] seals the composition into a read-only
//!    [`FontDefinition`].
//!
//! The set of renderers is closed; [`RendererKind`] implements the trait
//! directly.

mod bitplane;
mod buffer;
mod definition;

pub use bitplane::{compose_glyph, BitPlane};
pub use buffer::MatrixBuffer;
pub use definition::{Composition, FontDefinition};

use fontmatrix_spec::{
    BackendError, CharRange, FontMetrics, GlyphPlacement, PixelSize, RendererKind, MAX_CHAR_CODE,
};
use thiserror::Error;

/// Errors raised while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The matrix buffer could not be allocated.
    #[error("matrix buffer allocation of {bytes} bytes failed")]
    Allocation { bytes: usize },

    /// A computed address fell outside the glyph's own region.
    #[error("matrix address out of bounds: glyph {glyph}, row {row}, byte {byte}")]
    OutOfBounds { glyph: usize, row: usize, byte: usize },

    /// The range reaches past the last code a matrix font can hold.
    #[error("character range {0} exceeds code {MAX_CHAR_CODE}")]
    InvalidRange(CharRange),

    /// The cell has no area.
    #[error("empty glyph cell {0}")]
    EmptyCell(PixelSize),

    /// A placement belongs to a code outside the rendered range.
    #[error("character #{code} is outside the rendered range {range}")]
    CodeOutsideRange { code: u32, range: CharRange },

    /// The number of placements does not match the range.
    #[error("expected {expected} placements, got {actual}")]
    GlyphCountMismatch { expected: usize, actual: usize },
}

impl BackendError for RenderError {
    fn code(&self) -> &'static str {
        match self {
            RenderError::Allocation { .. } => "RENDER_001",
            RenderError::OutOfBounds { .. } => "RENDER_002",
            RenderError::InvalidRange(_) => "RENDER_003",
            RenderError::EmptyCell(_) => "RENDER_004",
            RenderError::CodeOutsideRange { .. } => "RENDER_005",
            RenderError::GlyphCountMismatch { .. } => "RENDER_006",
        }
    }

    fn category(&self) -> &'static str {
        "render"
    }
}

/// Output geometry of one cell at a given pixel depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixGeometry {
    /// Bits per output pixel.
    pub bits_per_pixel: u32,
    /// Encoded row width in bits.
    pub matrix_width: u32,
    /// Rows per cell.
    pub matrix_height: u32,
    /// Bytes per encoded row.
    pub matrix_pitch: u32,
    /// Bytes per cell.
    pub glyph_bytes: usize,
}

impl MatrixGeometry {
    pub fn new(bits_per_pixel: u32, cell: PixelSize) -> Self {
        let matrix_width = bits_per_pixel * cell.width;
        let matrix_pitch = matrix_width.div_ceil(8);
        Self {
            bits_per_pixel,
            matrix_width,
            matrix_height: cell.height,
            matrix_pitch,
            glyph_bytes: matrix_pitch as usize * cell.height as usize,
        }
    }
}

/// A pixel-depth encoding strategy.
pub trait MatrixRenderer {
    /// Short name used in file names and reports.
    fn name(&self) -> &'static str;

    /// Bit layout of one output pixel.
    fn plane(&self) -> BitPlane;

    /// Output geometry for a cell.
    fn geometry(&self, cell: PixelSize) -> MatrixGeometry {
        MatrixGeometry::new(self.plane().bits, cell)
    }

    /// Allocates a zero-filled composition for every code of `range`.
    fn init<'a>(
        &self,
        metrics: &'a FontMetrics,
        range: CharRange,
    ) -> Result<Composition<'a>, RenderError>;

    /// Composes placements into their cells.
    ///
    /// Exactly one placement per code of the range is expected.
    fn compose(
        &self,
        composition: &mut Composition<'_>,
        placements: &[GlyphPlacement],
    ) -> Result<(), RenderError>;

    /// Seals the composition.
    fn finish<'a>(&self, composition: Composition<'a>) -> FontDefinition<'a>;

    /// Runs all three steps.
    fn render<'a>(
        &self,
        metrics: &'a FontMetrics,
        range: CharRange,
        placements: &[GlyphPlacement],
    ) -> Result<FontDefinition<'a>, RenderError> {
        let mut composition = self.init(metrics, range)?;
        self.compose(&mut composition, placements)?;
        Ok(self.finish(composition))
    }
}

impl MatrixRenderer for RendererKind {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn plane(&self) -> BitPlane {
        let bits = self.bits_per_pixel();
        // only the high bit of a slot is drawn; the low bits stay free
        BitPlane {
            bits,
            on: 1u8 << (bits - 1),
        }
    }

    fn init<'a>(
        &self,
        metrics: &'a FontMetrics,
        range: CharRange,
    ) -> Result<Composition<'a>, RenderError> {
        if !range.is_within_limit() {
            return Err(RenderError::InvalidRange(range));
        }
        if metrics.cell.width == 0 || metrics.cell.height == 0 {
            return Err(RenderError::EmptyCell(metrics.cell));
        }
        let geometry = self.geometry(metrics.cell);
        let buffer = MatrixBuffer::zeroed(
            range.len(),
            geometry.matrix_height as usize,
            geometry.matrix_pitch as usize,
        )?;
        Ok(Composition::new(*self, range, geometry, buffer, metrics))
    }

    fn compose(
        &self,
        composition: &mut Composition<'_>,
        placements: &[GlyphPlacement],
    ) -> Result<(), RenderError> {
        let range = composition.range();
        if placements.len() != range.len() {
            return Err(RenderError::GlyphCountMismatch {
                expected: range.len(),
                actual: placements.len(),
            });
        }

        let cell = composition.metrics().cell;
        let plane = self.plane();
        for placement in placements {
            if !range.contains(placement.code) {
                return Err(RenderError::CodeOutsideRange {
                    code: placement.code,
                    range,
                });
            }
            let index = (placement.code - range.from()) as usize;
            let dropped = compose_glyph(composition.buffer_mut(), index, placement, cell, plane)?;
            composition.add_dropped(dropped);
        }
        Ok(())
    }

    fn finish<'a>(&self, composition: Composition<'a>) -> FontDefinition<'a> {
        composition.seal()
    }
}
