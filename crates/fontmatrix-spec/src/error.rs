//! Error types for job validation and pipeline reporting.

use thiserror::Error;

/// Error codes for job validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Point size missing or below the minimum
    InvalidSize,
    /// E002: Vertical resolution is zero
    InvalidDpi,
    /// E003: Horizontal resolution given as zero
    InvalidHdpi,
    /// E004: Character code outside 0..=255
    CharCodeOutOfRange,
    /// E005: No renderer selected
    NoRenderer,
    /// E006: No writer selected
    NoWriter,
    /// E007: Font path missing
    MissingFont,
    /// E008: Forced origin lies above the cell bottom
    PositiveOrigin,
    /// E009: Output basename escapes the output directory
    UnsafeOutputName,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSize => "E001",
            ErrorCode::InvalidDpi => "E002",
            ErrorCode::InvalidHdpi => "E003",
            ErrorCode::CharCodeOutOfRange => "E004",
            ErrorCode::NoRenderer => "E005",
            ErrorCode::NoWriter => "E006",
            ErrorCode::MissingFont => "E007",
            ErrorCode::PositiveOrigin => "E008",
            ErrorCode::UnsafeOutputName => "E009",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Job field the error refers to (e.g., "range\[1\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a job file.
#[derive(Debug, Error)]
pub enum SpecError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of job validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.ok {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Each pipeline stage error implements this so the CLI and the run report
/// can surface a stable code and a category without knowing the concrete
/// error type.
pub trait BackendError: std::error::Error {
    /// Stable error code such as "SCAN_001" or "RENDER_003".
    fn code(&self) -> &'static str;

    /// Human-readable message, usually the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Category grouping related errors ("source", "scan", "render", ...).
    fn category(&self) -> &'static str;
}
