//! Generate command implementation
//!
//! Scans the font, places and renders every glyph of the range, and writes
//! the selected output files for each renderer.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use fontmatrix_backend::{FontPipeline, GlyphSource, PipelineError, RenderedOutput};
use fontmatrix_spec::{validate_job, FontJob, FontReport, ReportError};

use super::reporting::{self, error_codes, finish_failure, CommandOutcome, RunOptions};

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 job error, 2 generation error
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

/// Runs the generate command against an already opened glyph source.
pub fn run_with_source<S: GlyphSource + ?Sized>(
    job: &FontJob,
    source: &mut S,
    options: RunOptions,
) -> Result<CommandOutcome> {
    let start = Instant::now();
    let out_dir = job.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let builder = FontReport::builder(job.font.display().to_string(), job.range);

    if !options.json {
        println!("{} {}", "Generating from:".cyan().bold(), job.font.display());
        println!("{} {}", "Output dir:".cyan().bold(), out_dir.display());
        println!("{} {} pt, {}", "Size:".dimmed(), job.size, job.range);
    }

    let prepared = match FontPipeline::prepare(source, job) {
        Ok(prepared) => prepared,
        Err(err) => return finish_failure(builder, &err, options, start),
    };
    let builder = builder
        .metrics(prepared.metrics.clone())
        .diagnostics(&prepared.diagnostics);

    if !options.json {
        if options.verbose {
            reporting::print_metrics(&prepared.metrics, &prepared.range);
        }
        reporting::print_diagnostics(&prepared.diagnostics, options.verbose);
    }

    let outputs = match prepared.generate(job) {
        Ok(outputs) => outputs,
        Err(err) => return finish_failure(builder, &err, options, start),
    };

    if let Err(e) = reporting::write_artifacts(&out_dir, &outputs) {
        let report = builder
            .error(ReportError::new(error_codes::WRITE_FAILED, format!("{:#}", e)))
            .duration_ms(start.elapsed().as_millis() as u64)
            .build();
        if options.json {
            reporting::print_report_json(&report)?;
        } else {
            println!("  {} [{}]: {:#}", "x".red(), error_codes::WRITE_FAILED.red(), e);
            println!("\n{} could not store output", "FAILED".red().bold());
        }
        return Ok(CommandOutcome {
            code: ExitCode::from(2),
            report,
        });
    }

    let mut builder = builder;
    for output in &outputs {
        builder = builder.renderer(output.report(&out_dir));
    }
    let report = builder
        .duration_ms(start.elapsed().as_millis() as u64)
        .build();

    if options.json {
        reporting::print_report_json(&report)?;
    } else {
        print_outputs(&outputs, &out_dir);
        let files: usize = outputs.iter().map(|o| o.artifacts.len()).sum();
        println!(
            "\n{} Generated {} file(s) in {}ms",
            "SUCCESS".green().bold(),
            files,
            report.duration_ms
        );
    }

    Ok(CommandOutcome {
        code: ExitCode::SUCCESS,
        report,
    })
}

fn print_outputs(outputs: &[RenderedOutput], out_dir: &Path) {
    println!("\n{}", "Outputs:".green().bold());
    for output in outputs {
        let g = &output.geometry;
        println!(
            "  {} {}: matrix {} x {}, {} bytes ({})",
            "+".green(),
            output.renderer,
            g.matrix_width,
            g.matrix_height,
            output.buffer_size,
            &output.buffer_hash[..16]
        );
        if output.clipped_pixels > 0 {
            println!(
                "    {} {} pixel(s) outside the cell were dropped",
                "!".yellow(),
                output.clipped_pixels
            );
        }
        for artifact in &output.artifacts {
            let path = out_dir.join(&artifact.file_name);
            println!("    {}", path.display().to_string().dimmed());
        }
    }
}
