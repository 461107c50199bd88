//! Test harness utilities for running commands and inspecting their outputs.

use std::fs;
use std::path::Path;

use fontmatrix_backend::GlyphSource;
use fontmatrix_cli::commands::{check, generate, CommandOutcome, RunOptions};
use fontmatrix_spec::FontJob;
use tempfile::TempDir;

use crate::fixtures::BLOCK_FONT_PATH;

/// A working directory plus helpers to run commands into it.
pub struct TestHarness {
    /// Working directory for test outputs.
    pub work_dir: TempDir,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// A block-font job at size 10 writing into the working directory.
    pub fn job(&self) -> FontJob {
        FontJob::new(BLOCK_FONT_PATH, 10).with_out_dir(self.path())
    }

    /// Runs `generate` in JSON mode so test output stays quiet.
    pub fn generate<S: GlyphSource + ?Sized>(
        &self,
        job: &FontJob,
        source: &mut S,
    ) -> CommandOutcome {
        generate::run_with_source(job, source, json_mode()).expect("generate command failed")
    }

    /// Runs `check` in JSON mode.
    pub fn check<S: GlyphSource + ?Sized>(
        &self,
        job: &FontJob,
        source: &mut S,
    ) -> CommandOutcome {
        check::run_with_source(job, source, json_mode()).expect("check command failed")
    }

    /// Reads a file from the working directory.
    pub fn read(&self, name: &str) -> Vec<u8> {
        let path = self.path().join(name);
        fs::read(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Reads a text file from the working directory.
    pub fn read_text(&self, name: &str) -> String {
        String::from_utf8(self.read(name)).expect("output is not UTF-8")
    }

    /// Returns true if `name` exists in the working directory.
    pub fn exists(&self, name: &str) -> bool {
        self.path().join(name).exists()
    }
}

fn json_mode() -> RunOptions {
    RunOptions {
        verbose: false,
        json: true,
    }
}

/// Decodes a PNG and returns its width, height and 8-bit gray pixels.
pub fn decode_gray_png(data: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder.read_info().expect("Failed to read PNG header");
    let mut pixels = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut pixels)
        .expect("Failed to decode PNG frame");
    assert_eq!(info.color_type, png::ColorType::Grayscale);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    pixels.truncate(info.buffer_size());
    (info.width, info.height, pixels)
}
