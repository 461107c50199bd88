//! fontmatrix CLI - Matrix font generator for firmware displays
//!
//! Renders the glyphs of a TrueType/OpenType font into fixed-size bit
//! matrices and writes them as text dumps, C sources, raw binaries, or PNG
//! previews.

use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use fontmatrix_cli::commands::{self, RunOptions};
use fontmatrix_cli::input::{resolve_job, JobOverrides};
use fontmatrix_spec::{RendererKind, WriterKind};

/// fontmatrix - Fixed-cell matrix font generator
#[derive(Parser)]
#[command(name = "fontmatrix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a font and write the selected output files
    Generate {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Scan a font and print its cell metrics without rendering
    Check {
        #[command(flatten)]
        job: JobArgs,
    },
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Point size (may come from --config instead)
    size: Option<u32>,

    /// Font file (may come from --config instead)
    font: Option<PathBuf>,

    /// JSON job file; command-line values override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vertical resolution in dpi (default: 72)
    #[arg(short, long)]
    dpi: Option<u32>,

    /// Horizontal resolution in dpi (default: same as --dpi)
    #[arg(short = 'H', long)]
    hdpi: Option<u32>,

    /// Force the baseline to this row offset (must be <= 0)
    #[arg(short = 'O', long, allow_hyphen_values = true)]
    origin: Option<i32>,

    /// Use the baseline calculated from the line height
    #[arg(short = 'C', long)]
    calc: bool,

    /// First character code (default: 32)
    #[arg(short, long)]
    from: Option<u32>,

    /// Last character code (default: 126)
    #[arg(short, long)]
    to: Option<u32>,

    /// Output basename without extension
    #[arg(short, long)]
    output: Option<String>,

    /// Pixel encoding (repeatable)
    #[arg(short = 'R', long = "renderer", value_parser = renderer_values())]
    renderers: Vec<String>,

    /// Output format (repeatable)
    #[arg(short = 'W', long = "writer", value_parser = writer_values())]
    writers: Vec<String>,

    /// Directory receiving the written files (default: current directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Show info diagnostics and the metrics summary
    #[arg(short, long)]
    verbose: bool,

    /// Output the machine-readable run report (no colored output)
    #[arg(long)]
    json: bool,
}

fn renderer_values() -> PossibleValuesParser {
    PossibleValuesParser::new(
        RendererKind::ALL.map(|kind| PossibleValue::new(kind.as_str()).help(kind.description())),
    )
}

fn writer_values() -> PossibleValuesParser {
    PossibleValuesParser::new(
        WriterKind::ALL.map(|kind| PossibleValue::new(kind.as_str()).help(kind.description())),
    )
}

impl JobArgs {
    fn overrides(&self) -> JobOverrides {
        JobOverrides {
            size: self.size,
            font: self.font.clone(),
            dpi: self.dpi,
            hdpi: self.hdpi,
            origin: self.origin,
            calculate: self.calc,
            from: self.from,
            to: self.to,
            output: self.output.clone(),
            renderers: self.renderers.clone(),
            writers: self.writers.clone(),
            out_dir: self.out_dir.clone(),
        }
    }

    fn options(&self) -> RunOptions {
        RunOptions {
            verbose: self.verbose,
            json: self.json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { job } => resolve_job(job.config.as_deref(), &job.overrides())
            .and_then(|resolved| commands::generate::run(&resolved, job.options())),
        Commands::Check { job } => resolve_job(job.config.as_deref(), &job.overrides())
            .and_then(|resolved| commands::check::run(&resolved, job.options())),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
