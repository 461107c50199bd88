use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use fontmatrix_backend::{PipelineError, RenderedOutput};
use fontmatrix_spec::{
    BackendError, CharRange, Diagnostics, FontMetrics, FontReport, FontReportBuilder, ReportError,
    Severity, ValidationError,
};

/// Error codes raised by the CLI itself rather than a pipeline stage.
pub mod error_codes {
    /// An output file could not be written
    pub const WRITE_FAILED: &str = "CLI_001";
}

/// Presentation switches shared by all commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Show info diagnostics and the metrics summary.
    pub verbose: bool,
    /// Print the run report as JSON instead of colored text.
    pub json: bool,
}

/// What a command produced: its exit code and the run report.
#[derive(Debug)]
pub struct CommandOutcome {
    pub code: ExitCode,
    pub report: FontReport,
}

/// Exit code for a failed pipeline: 1 for a bad job, 2 for a failed run.
pub(crate) fn exit_code_for(err: &PipelineError) -> ExitCode {
    if err.is_configuration() {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    }
}

/// Records a pipeline failure in the report.
pub(crate) fn apply_pipeline_error(
    mut builder: FontReportBuilder,
    err: &PipelineError,
) -> FontReportBuilder {
    match err {
        PipelineError::Validation(errors) => {
            for e in errors {
                builder = builder.error(ReportError::from(e));
            }
            builder
        }
        other => builder.error(ReportError::from_backend(other)),
    }
}

/// Reports a pipeline failure in the chosen output mode.
pub(crate) fn finish_failure(
    builder: FontReportBuilder,
    err: &PipelineError,
    options: RunOptions,
    start: Instant,
) -> Result<CommandOutcome> {
    let report = apply_pipeline_error(builder, err)
        .duration_ms(start.elapsed().as_millis() as u64)
        .build();
    if options.json {
        print_report_json(&report)?;
    } else {
        print_pipeline_error(err);
    }
    Ok(CommandOutcome {
        code: exit_code_for(err),
        report,
    })
}

pub(crate) fn print_pipeline_error(err: &PipelineError) {
    match err {
        PipelineError::Validation(errors) => {
            print_validation_errors(errors);
            println!(
                "\n{} Job validation failed with {} error(s)",
                "FAILED".red().bold(),
                errors.len()
            );
        }
        other => {
            println!(
                "  {} [{}]: {}",
                "x".red(),
                other.code().red(),
                other.message()
            );
            println!("\n{} {} failure", "FAILED".red().bold(), other.category());
        }
    }
}

fn print_validation_errors(errors: &[ValidationError]) {
    println!("\n{}", "Errors:".red().bold());
    for error in errors {
        let path = error
            .path
            .as_ref()
            .map(|p| format!(" ({})", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code.to_string().red(),
            path.dimmed(),
            error.message
        );
    }
}

/// Prints warnings always and info entries only when `verbose` is set.
pub(crate) fn print_diagnostics(diagnostics: &Diagnostics, verbose: bool) {
    let shown: Vec<_> = diagnostics
        .iter()
        .filter(|d| verbose || d.severity == Severity::Warning)
        .collect();
    if shown.is_empty() {
        return;
    }

    println!("\n{}", "Diagnostics:".yellow().bold());
    for d in shown {
        let marker = match d.severity {
            Severity::Warning => "!".yellow(),
            Severity::Info => "i".blue(),
        };
        let glyph = d
            .char_code
            .map(|c| format!(" glyph #{}", c))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            marker,
            d.code.to_string().yellow(),
            glyph.dimmed(),
            d.message
        );
    }
}

/// Prints the metrics summary block.
pub(crate) fn print_metrics(metrics: &FontMetrics, range: &CharRange) {
    let origin = if metrics.origin_forced {
        "forced"
    } else {
        "detected"
    };
    println!("\n{}", "Metrics:".cyan().bold());
    println!("  name:        '{}'", metrics.name);
    println!("  range:       {}", range);
    println!("  size:        {} pt", metrics.size.points);
    println!("  dpi:         {}", metrics.size.dpi_label());
    println!("  matrix:      {}", metrics.cell);
    println!("  nl-height:   {}", metrics.absolute_height);
    println!("  max-ascent:  {}", metrics.max_ascent);
    println!("  max-descent: {}", metrics.max_descent);
    println!(
        "  baseline:    calculated: {}  detected: {} ({})",
        metrics.calculated_baseline, metrics.detected_baseline, origin
    );
    println!("  em:          {}", metrics.em);
    println!("  ex:          {}", metrics.ex);
    println!("  we:          {}", metrics.we);
}

/// Stores every artifact of `outputs` under `out_dir`.
///
/// Basenames may contain directories; missing ones are created.
pub(crate) fn write_artifacts(out_dir: &Path, outputs: &[RenderedOutput]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for output in outputs {
        for artifact in &output.artifacts {
            let path = out_dir.join(&artifact.file_name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(&path, &artifact.data)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }
    }
    Ok(written)
}

pub(crate) fn print_report_json(report: &FontReport) -> Result<()> {
    let json = report
        .to_json_pretty()
        .context("Failed to serialize run report")?;
    println!("{}", json);
    Ok(())
}
