//! fontmatrix backend
//!
//! Turns the glyphs of a font into a fixed-cell matrix font: every glyph
//! occupies the same cell, every pixel is packed into N bits, and the whole
//! font is one flat byte buffer that firmware can index directly.
//!
//! # Stages
//!
//! - **Glyph sources**: [`FontdueSource`] for TrueType/OpenType files,
//!   [`TableGlyphSource`] for bitmaps already in memory
//! - **Metrics scanner**: derives one cell geometry and baseline from codes
//!   1..=254, independent of the range finally rendered
//! - **Placement resolver**: positions each glyph in the cell, clamping
//!   vertically and flagging anything that still overflows
//! - **Matrix renderers**: 1 and 2 bits per pixel, composed into a
//!   bounds-checked [`MatrixBuffer`]
//! - **Writers**: character-art text, C header plus array body, raw binary,
//!   and a deterministic PNG preview
//!
//! # Example
//!
//! ```
//! use fontmatrix_backend::{FontPipeline, TableGlyphSource};
//! use fontmatrix_spec::{FontJob, GlyphBitmap, RendererKind};
//!
//! let mut source = TableGlyphSource::new(10)
//!     .with_blank_advance(6)
//!     .with_glyph('M' as u32, GlyphBitmap::solid(5, 7, 0, 7).with_vertical_advance(10))
//!     .with_glyph('A' as u32, GlyphBitmap::solid(5, 7, 0, 7));
//!
//! let job = FontJob::new("demo.ttf", 10).with_range(65, 66);
//! let prepared = FontPipeline::prepare(&mut source, &job).unwrap();
//! let font = prepared.render(RendererKind::OneBit).unwrap();
//!
//! assert_eq!(font.count, 2);
//! assert_eq!(font.buffer_size(), font.glyph_bytes * 2);
//! ```

pub mod pipeline;
pub mod placement;
pub mod render;
pub mod scan;
pub mod source;
pub mod writer;

// Re-export main types for convenience
pub use pipeline::{FontPipeline, PipelineError, PreparedFont, RenderedOutput};
pub use placement::{clamp_vertical, place_glyph, resolve_placements, PlacementError};
pub use render::{
    BitPlane, Composition, FontDefinition, MatrixBuffer, MatrixGeometry, MatrixRenderer,
    RenderError,
};
pub use scan::{scan_metrics, ScanError, ScanOptions};
pub use source::{FontdueSource, GlyphSource, GlyphSourceError, TableGlyphSource};
pub use writer::{define_name, Artifact, FontWriter, PngConfig, PngError, WriterError};
