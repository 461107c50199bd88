//! End-to-end pipeline: scan, place, render, write.
//!
//! The stages run strictly in sequence and the first failure ends the run.
//! Scanning and placement happen once per job; the resulting
//! [`PreparedFont`] can then be rendered at every requested pixel depth.

use std::path::Path;

use fontmatrix_spec::{
    font_name_from_path, validate_job, BackendError, CharRange, Diagnostics, FontJob, FontMetrics,
    GlyphPlacement, RendererKind, RendererReport, ValidationError,
};
use thiserror::Error;

use crate::placement::{resolve_placements, PlacementError};
use crate::render::{FontDefinition, MatrixGeometry, MatrixRenderer, RenderError};
use crate::scan::{scan_metrics, ScanError, ScanOptions};
use crate::source::{FontdueSource, GlyphSource, GlyphSourceError};
use crate::writer::{Artifact, FontWriter, WriterError};

/// Any failure of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The job did not pass validation.
    #[error("job validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Source(#[from] GlyphSourceError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Writer(#[from] WriterError),
}

impl PipelineError {
    /// Returns true for errors caused by the job rather than by the run:
    /// invalid settings, an unreadable font, or an unusable baseline.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PipelineError::Validation(_)
                | PipelineError::Source(GlyphSourceError::Load(_) | GlyphSourceError::Io(_))
                | PipelineError::Scan(ScanError::InvalidSize(_) | ScanError::PositiveBaseline(_))
        )
    }
}

impl BackendError for PipelineError {
    fn code(&self) -> &'static str {
        match self {
            PipelineError::Validation(errors) => errors
                .first()
                .map(|e| e.code.code())
                .unwrap_or("VALIDATION"),
            PipelineError::Source(e) => e.code(),
            PipelineError::Scan(e) => e.code(),
            PipelineError::Placement(e) => e.code(),
            PipelineError::Render(e) => e.code(),
            PipelineError::Writer(e) => e.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "validation",
            PipelineError::Source(e) => e.category(),
            PipelineError::Scan(e) => e.category(),
            PipelineError::Placement(e) => e.category(),
            PipelineError::Render(e) => e.category(),
            PipelineError::Writer(e) => e.category(),
        }
    }
}

/// Result of scanning and placement, ready to be rendered.
#[derive(Debug, Clone)]
pub struct PreparedFont {
    pub metrics: FontMetrics,
    pub range: CharRange,
    pub placements: Vec<GlyphPlacement>,
    pub diagnostics: Diagnostics,
}

impl PreparedFont {
    /// Renders the placements at one pixel depth.
    pub fn render(&self, kind: RendererKind) -> Result<FontDefinition<'_>, RenderError> {
        kind.render(&self.metrics, self.range, &self.placements)
    }

    /// Basename for the output of `kind` under `job`.
    ///
    /// The job's `output` or `<name>_<size>_<w>x<h>`, suffixed with the
    /// renderer name when the job renders more than one depth.
    pub fn basename(&self, job: &FontJob, kind: RendererKind) -> String {
        let base = job
            .output
            .clone()
            .unwrap_or_else(|| self.metrics.default_basename());
        if distinct_renderers(job).len() > 1 {
            format!("{}_{}", base, kind.as_str())
        } else {
            base
        }
    }

    /// Renders every requested depth and runs every requested writer.
    pub fn generate(&self, job: &FontJob) -> Result<Vec<RenderedOutput>, PipelineError> {
        let mut outputs = Vec::new();
        for kind in distinct_renderers(job) {
            let definition = self.render(kind)?;
            let basename = self.basename(job, kind);
            let mut artifacts = Vec::new();
            for writer in &job.writers {
                artifacts.extend(writer.write(&definition, &basename)?);
            }
            outputs.push(RenderedOutput::new(&definition, artifacts));
        }
        Ok(outputs)
    }
}

fn distinct_renderers(job: &FontJob) -> Vec<RendererKind> {
    let mut kinds: Vec<RendererKind> = Vec::with_capacity(job.renderers.len());
    for kind in &job.renderers {
        if !kinds.contains(kind) {
            kinds.push(*kind);
        }
    }
    kinds
}

/// Everything produced for one renderer, detached from the metrics borrow.
#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub renderer: RendererKind,
    pub geometry: MatrixGeometry,
    pub buffer_size: usize,
    pub buffer_hash: String,
    pub clipped_pixels: usize,
    pub artifacts: Vec<Artifact>,
}

impl RenderedOutput {
    fn new(definition: &FontDefinition<'_>, artifacts: Vec<Artifact>) -> Self {
        Self {
            renderer: definition.renderer,
            geometry: definition.renderer.geometry(definition.metrics.cell),
            buffer_size: definition.buffer_size(),
            buffer_hash: definition.buffer_hash(),
            clipped_pixels: definition.clipped_pixels,
            artifacts,
        }
    }

    /// Report entry, with artifacts recorded as stored under `out_dir`.
    pub fn report(&self, out_dir: &Path) -> RendererReport {
        RendererReport {
            renderer: self.renderer,
            matrix_width: self.geometry.matrix_width,
            matrix_height: self.geometry.matrix_height,
            matrix_pitch: self.geometry.matrix_pitch,
            glyph_bytes: self.geometry.glyph_bytes as u32,
            buffer_size: self.buffer_size,
            buffer_hash: self.buffer_hash.clone(),
            files: self
                .artifacts
                .iter()
                .map(|a| a.record(out_dir.join(&a.file_name).display().to_string()))
                .collect(),
        }
    }
}

/// Pipeline entry points.
pub struct FontPipeline;

impl FontPipeline {
    /// Opens the job's font file with the outline rasterizer.
    pub fn open_source(job: &FontJob) -> Result<FontdueSource, PipelineError> {
        Ok(FontdueSource::from_file(&job.font)?)
    }

    /// Validates the job and runs only the metrics scanner.
    pub fn check_metrics<S: GlyphSource + ?Sized>(
        source: &mut S,
        job: &FontJob,
    ) -> Result<(FontMetrics, Diagnostics), PipelineError> {
        validate_job(job)
            .into_result()
            .map_err(PipelineError::Validation)?;

        let mut diagnostics = Diagnostics::new();
        let metrics = scan(source, job, &mut diagnostics)?;
        Ok((metrics, diagnostics))
    }

    /// Validates the job, scans the font and places every glyph of the range.
    pub fn prepare<S: GlyphSource + ?Sized>(
        source: &mut S,
        job: &FontJob,
    ) -> Result<PreparedFont, PipelineError> {
        validate_job(job)
            .into_result()
            .map_err(PipelineError::Validation)?;

        let mut diagnostics = Diagnostics::new();
        let metrics = scan(source, job, &mut diagnostics)?;
        let placements = resolve_placements(source, &metrics, job.range, &mut diagnostics)?;

        Ok(PreparedFont {
            metrics,
            range: job.range,
            placements,
            diagnostics,
        })
    }
}

fn scan<S: GlyphSource + ?Sized>(
    source: &mut S,
    job: &FontJob,
    diagnostics: &mut Diagnostics,
) -> Result<FontMetrics, ScanError> {
    let name = font_name_from_path(&job.font);
    let options = ScanOptions::new(job.origin, job.baseline);
    scan_metrics(source, &name, &job.raster_size(), &options, diagnostics)
}
