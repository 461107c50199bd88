//! Check command implementation
//!
//! Runs only the metrics scanner and prints the resulting cell geometry and
//! every diagnostic, including info entries. Nothing is written.

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use fontmatrix_backend::{FontPipeline, GlyphSource, PipelineError};
use fontmatrix_spec::{validate_job, FontJob, FontReport};

use super::reporting::{self, finish_failure, CommandOutcome, RunOptions};

/// Run the check command
///
/// # Returns
/// Exit code: 0 success, 1 job error, 2 scan error
pub fn run(job: &FontJob, options: RunOptions) -> Result<ExitCode> {
    let start = Instant::now();
    let builder = FontReport::builder(job.font.display().to_string(), job.range);

    if let Err(errors) = validate_job(job).into_result() {
        let err = PipelineError::Validation(errors);
        return finish_failure(builder, &err, options, start).map(|o| o.code);
    }
    let mut source = match FontPipeline::open_source(job) {
        Ok(source) => source,
        Err(err) => return finish_failure(builder, &err, options, start).map(|o| o.code),
    };

    run_with_source(job, &mut source, options).map(|o| o.code)
}

/// Runs the check command against an already opened glyph source.
pub fn run_with_source<S: GlyphSource + ?Sized>(
    job: &FontJob,
    source: &mut S,
    options: RunOptions,
) -> Result<CommandOutcome> {
    let start = Instant::now();
    let builder = FontReport::builder(job.font.display().to_string(), job.range);

    if !options.json {
        println!("{} {}", "Checking:".cyan().bold(), job.font.display());
    }

    let (metrics, diagnostics) = match FontPipeline::check_metrics(source, job) {
        Ok(scanned) => scanned,
        Err(err) => return finish_failure(builder, &err, options, start),
    };

    let report = builder
        .metrics(metrics.clone())
        .diagnostics(&diagnostics)
        .duration_ms(start.elapsed().as_millis() as u64)
        .build();

    if options.json {
        reporting::print_report_json(&report)?;
    } else {
        reporting::print_metrics(&metrics, &job.range);
        reporting::print_diagnostics(&diagnostics, true);
        println!(
            "\n{} cell {} with baseline {}",
            "OK".green().bold(),
            metrics.cell,
            metrics.baseline
        );
    }

    Ok(CommandOutcome {
        code: ExitCode::SUCCESS,
        report,
    })
}
