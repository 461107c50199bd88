//! fontmatrix data model
//!
//! This crate holds the types shared by every stage of the matrix font
//! pipeline: font-wide metrics, per-glyph bitmaps and placements, the job
//! configuration, job validation, diagnostics, and the run report.
//!
//! # Example
//!
//! ```
//! use fontmatrix_spec::{validate_job, FontJob, RendererKind, WriterKind};
//!
//! let job = FontJob::new("fonts/PT Mono.ttf", 32)
//!     .with_hdpi(46)
//!     .with_range(0, 255)
//!     .with_renderers(vec![RendererKind::TwoBit])
//!     .with_writers(vec![WriterKind::CRaw]);
//!
//! assert!(validate_job(&job).is_ok());
//! assert_eq!(job.range.len(), 256);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Validation error codes and the backend error trait
//! - [`diagnostics`]: Non-fatal warnings raised by the pipeline
//! - [`metrics`]: Font metrics, cell geometry, raster size
//! - [`glyph`]: Glyph bitmaps and placements
//! - [`job`]: Job configuration, character ranges, renderer and writer kinds
//! - [`validation`]: Job validation
//! - [`report`]: Run report types and builder

pub mod diagnostics;
pub mod error;
pub mod glyph;
pub mod job;
pub mod metrics;
pub mod report;
pub mod validation;

// Re-export commonly used types at the crate root
pub use diagnostics::{Diagnostic, Diagnostics, Severity, WarningCode};
pub use error::{BackendError, ErrorCode, SpecError, ValidationError, ValidationResult};
pub use glyph::{GlyphBitmap, GlyphPlacement, VerticalShift};
pub use job::{
    CharRange, FontJob, RendererKind, WriterKind, MAX_CHAR_CODE, SCAN_FIRST, SCAN_LAST,
};
pub use metrics::{
    font_name_from_path, BaselineMode, FontMetrics, PixelSize, RasterSize, DEFAULT_DPI,
    MIN_POINT_SIZE,
};
pub use report::{
    ArtifactRecord, FontReport, FontReportBuilder, RendererReport, ReportError, REPORT_VERSION,
};
pub use validation::{is_safe_basename, validate_job};
