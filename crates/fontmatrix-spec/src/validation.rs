//! Job validation.
//!
//! All checks run and every failure is reported, so a user fixing a job
//! file sees the complete list at once.

use std::path::{Component, Path};

use crate::error::{ErrorCode, ValidationError, ValidationResult};
use crate::job::{FontJob, MAX_CHAR_CODE};
use crate::metrics::MIN_POINT_SIZE;

/// Validates a job before any glyph is rasterized.
///
/// # Example
/// ```
/// use fontmatrix_spec::{validate_job, FontJob};
///
/// assert!(validate_job(&FontJob::new("mono.ttf", 12)).is_ok());
/// assert!(!validate_job(&FontJob::new("mono.ttf", 1)).is_ok());
/// ```
pub fn validate_job(job: &FontJob) -> ValidationResult {
    let mut result = ValidationResult::success();

    if job.font.as_os_str().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::MissingFont,
            "font file not specified",
            "font",
        ));
    }

    if job.size < MIN_POINT_SIZE {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSize,
            format!(
                "font size must be at least {} pt, got {}",
                MIN_POINT_SIZE, job.size
            ),
            "size",
        ));
    }

    if job.dpi == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidDpi,
            "dpi must be greater than 0",
            "dpi",
        ));
    }

    if job.hdpi == Some(0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidHdpi,
            "hdpi must be greater than 0 (omit it to reuse dpi)",
            "hdpi",
        ));
    }

    for (i, code) in [job.range.from(), job.range.to()].into_iter().enumerate() {
        if code > MAX_CHAR_CODE {
            result.add_error(ValidationError::with_path(
                ErrorCode::CharCodeOutOfRange,
                format!("character code {} out of range 0..={}", code, MAX_CHAR_CODE),
                format!("range[{}]", i),
            ));
        }
    }

    if let Some(origin) = job.origin {
        if origin > 0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::PositiveOrigin,
                format!("illegal baseline {}: must not be greater than 0", origin),
                "origin",
            ));
        }
    }

    if job.renderers.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoRenderer,
            "at least one renderer is required",
            "renderers",
        ));
    }

    if job.writers.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoWriter,
            "at least one writer is required",
            "writers",
        ));
    }

    if let Some(ref output) = job.output {
        if !is_safe_basename(output) {
            result.add_error(ValidationError::with_path(
                ErrorCode::UnsafeOutputName,
                format!("output name '{}' must be a plain relative name", output),
                "output",
            ));
        }
    }

    result
}

/// Returns true if `name` is a non-empty relative path without `..`.
pub fn is_safe_basename(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
