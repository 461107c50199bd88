//! Job assembly from a JSON job file and command-line values.
//!
//! A job file, when given, is loaded first; every value supplied on the
//! command line then replaces the file's value. Fields left unset by both
//! keep their serde defaults and are checked later by job validation.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use fontmatrix_spec::{BaselineMode, CharRange, FontJob, RendererKind, SpecError, WriterKind};

/// Command-line values that override the job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOverrides {
    pub size: Option<u32>,
    pub font: Option<PathBuf>,
    pub dpi: Option<u32>,
    pub hdpi: Option<u32>,
    pub origin: Option<i32>,
    /// Use the calculated baseline.
    pub calculate: bool,
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub output: Option<String>,
    pub renderers: Vec<String>,
    pub writers: Vec<String>,
    pub out_dir: Option<PathBuf>,
}

impl JobOverrides {
    /// Applies every set value to `job`.
    pub fn apply(&self, mut job: FontJob) -> Result<FontJob> {
        if let Some(size) = self.size {
            job.size = size;
        }
        if let Some(font) = &self.font {
            job.font = font.clone();
        }
        if let Some(dpi) = self.dpi {
            job.dpi = dpi;
        }
        if let Some(hdpi) = self.hdpi {
            job.hdpi = Some(hdpi);
        }
        if let Some(origin) = self.origin {
            job.origin = Some(origin);
        }
        if self.calculate {
            job.baseline = BaselineMode::Calculate;
        }
        if self.from.is_some() || self.to.is_some() {
            let from = self.from.unwrap_or(job.range.from());
            let to = self.to.unwrap_or(job.range.to());
            job.range = CharRange::new(from, to);
        }
        if let Some(output) = &self.output {
            job.output = Some(output.clone());
        }
        if !self.renderers.is_empty() {
            job.renderers = self
                .renderers
                .iter()
                .map(|name| parse_renderer(name))
                .collect::<Result<_>>()?;
        }
        if !self.writers.is_empty() {
            job.writers = self
                .writers
                .iter()
                .map(|name| parse_writer(name))
                .collect::<Result<_>>()?;
        }
        if let Some(dir) = &self.out_dir {
            job.out_dir = Some(dir.clone());
        }
        Ok(job)
    }
}

fn parse_renderer(name: &str) -> Result<RendererKind> {
    RendererKind::by_name(name).ok_or_else(|| {
        let known: Vec<&str> = RendererKind::ALL.iter().map(|k| k.as_str()).collect();
        anyhow!("unknown renderer: {} (expected {})", name, known.join(", "))
    })
}

fn parse_writer(name: &str) -> Result<WriterKind> {
    WriterKind::by_name(name).ok_or_else(|| {
        let known: Vec<&str> = WriterKind::ALL.iter().map(|k| k.as_str()).collect();
        anyhow!("unknown writer: {} (expected {})", name, known.join(", "))
    })
}

/// Reads a job file.
pub fn load_job_file(path: &Path) -> Result<FontJob> {
    FontJob::from_file(path).map_err(|e| {
        let action = match e {
            SpecError::Io(_) => "read",
            SpecError::JsonParse(_) => "parse",
        };
        anyhow::Error::new(e).context(format!("Failed to {} job file: {}", action, path.display()))
    })
}

/// Loads the optional job file and applies the overrides.
///
/// Without a file the job starts from defaults with no font and size 0,
/// which validation rejects unless the overrides supply both.
pub fn resolve_job(config: Option<&Path>, overrides: &JobOverrides) -> Result<FontJob> {
    let base = match config {
        Some(path) => load_job_file(path)?,
        None => FontJob::new(PathBuf::new(), 0),
    };
    overrides.apply(base)
}
