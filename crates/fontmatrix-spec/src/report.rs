//! Run report for `fontmatrix generate` and `fontmatrix check`.
//!
//! The report is what `--json` prints: the resolved metrics, one entry per
//! renderer with the buffer geometry and hash, the files written, and every
//! diagnostic raised along the way.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{BackendError, ValidationError};
use crate::job::{CharRange, RendererKind, WriterKind};
use crate::metrics::FontMetrics;

/// Report schema version.
pub const REPORT_VERSION: u32 = 1;

/// A complete run report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontReport {
    /// Report schema version.
    pub report_version: u32,
    /// Tool identifier and version.
    pub tool_version: String,
    /// Whether the run succeeded.
    pub ok: bool,
    /// Font file as given.
    pub font: String,
    /// Normalized character range.
    pub range: CharRange,
    /// Resolved metrics, absent if scanning failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FontMetrics>,
    /// One entry per renderer.
    pub renderers: Vec<RendererReport>,
    /// Non-fatal diagnostics.
    pub diagnostics: Vec<Diagnostic>,
    /// Fatal errors.
    pub errors: Vec<ReportError>,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
}

impl FontReport {
    /// Creates a new report builder.
    pub fn builder(font: impl Into<String>, range: CharRange) -> FontReportBuilder {
        FontReportBuilder::new(font, range)
    }

    /// Serializes the report to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Output geometry and artifacts of one renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererReport {
    /// Renderer used.
    pub renderer: RendererKind,
    /// Encoded matrix width in bits.
    pub matrix_width: u32,
    /// Matrix height in rows.
    pub matrix_height: u32,
    /// Bytes per matrix row.
    pub matrix_pitch: u32,
    /// Bytes per glyph.
    pub glyph_bytes: u32,
    /// Total buffer size in bytes.
    pub buffer_size: usize,
    /// BLAKE3 hash of the buffer.
    pub buffer_hash: String,
    /// Files written from this buffer.
    pub files: Vec<ArtifactRecord>,
}

/// One written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Writer that produced the file.
    pub writer: WriterKind,
    /// Path of the file.
    pub path: String,
    /// BLAKE3 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size: usize,
}

/// A fatal error as recorded in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    /// Stable code (e.g., "E001", "SCAN_002").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Job field the error refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ReportError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Records a stage error with its stable code.
    pub fn from_backend<E: BackendError + ?Sized>(err: &E) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<&ValidationError> for ReportError {
    fn from(err: &ValidationError) -> Self {
        Self {
            code: err.code.code().to_string(),
            message: err.message.clone(),
            path: err.path.clone(),
        }
    }
}

/// Builder for [`FontReport`].
#[derive(Debug)]
pub struct FontReportBuilder {
    font: String,
    range: CharRange,
    metrics: Option<FontMetrics>,
    renderers: Vec<RendererReport>,
    diagnostics: Vec<Diagnostic>,
    errors: Vec<ReportError>,
    duration_ms: u64,
    tool_version: String,
}

impl FontReportBuilder {
    /// Creates a builder for the given font and range.
    pub fn new(font: impl Into<String>, range: CharRange) -> Self {
        Self {
            font: font.into(),
            range,
            metrics: None,
            renderers: Vec::new(),
            diagnostics: Vec::new(),
            errors: Vec::new(),
            duration_ms: 0,
            tool_version: format!("fontmatrix v{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the tool identifier.
    pub fn tool_version(mut self, version: impl Into<String>) -> Self {
        self.tool_version = version.into();
        self
    }

    /// Sets the resolved metrics.
    pub fn metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Adds one renderer entry.
    pub fn renderer(mut self, renderer: RendererReport) -> Self {
        self.renderers.push(renderer);
        self
    }

    /// Appends diagnostics.
    pub fn diagnostics(mut self, diagnostics: &Diagnostics) -> Self {
        self.diagnostics.extend(diagnostics.iter().cloned());
        self
    }

    /// Adds a fatal error.
    pub fn error(mut self, error: ReportError) -> Self {
        self.errors.push(error);
        self
    }

    /// Sets the duration.
    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Builds the report; `ok` is true when no error was added.
    pub fn build(self) -> FontReport {
        FontReport {
            report_version: REPORT_VERSION,
            tool_version: self.tool_version,
            ok: self.errors.is_empty(),
            font: self.font,
            range: self.range,
            metrics: self.metrics,
            renderers: self.renderers,
            diagnostics: self.diagnostics,
            errors: self.errors,
            duration_ms: self.duration_ms,
        }
    }
}
