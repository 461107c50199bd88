//! End-to-end validation tests: rejected jobs and failed runs.

use std::path::PathBuf;
use std::process::ExitCode;

use fontmatrix_cli::commands::{generate, RunOptions};
use fontmatrix_cli::input::{resolve_job, JobOverrides};
use fontmatrix_spec::{validate_job, BaselineMode, FontJob, GlyphBitmap};
use fontmatrix_tests::fixtures::{BLOCK_ADVANCE, BLOCK_LINE_HEIGHT};
use fontmatrix_tests::{block_font, TestHarness};
use pretty_assertions::assert_eq;

fn json_mode() -> RunOptions {
    RunOptions {
        verbose: false,
        json: true,
    }
}

fn error_codes(harness: &TestHarness, job: &FontJob) -> (ExitCode, Vec<String>) {
    let outcome = harness.generate(job, &mut block_font());
    let codes = outcome.report.errors.iter().map(|e| e.code.clone()).collect();
    (outcome.code, codes)
}

#[test]
fn test_all_validation_errors_are_reported_together() {
    let harness = TestHarness::new();
    let job = FontJob::new("", 1)
        .with_dpi(0)
        .with_renderers(vec![])
        .with_writers(vec![]);

    let (code, codes) = error_codes(&harness, &job);
    assert_eq!(code, ExitCode::from(1));
    assert_eq!(codes, vec!["E007", "E001", "E002", "E005", "E006"]);
}

#[test]
fn test_out_of_range_codes() {
    let harness = TestHarness::new();
    let job = harness.job().with_range(0, 300);
    let (code, codes) = error_codes(&harness, &job);
    assert_eq!(code, ExitCode::from(1));
    assert_eq!(codes, vec!["E004"]);

    let result = validate_job(&job);
    assert_eq!(result.errors[0].path.as_deref(), Some("range[1]"));
}

#[test]
fn test_unsafe_output_name() {
    let harness = TestHarness::new();
    for name in ["../escape", "/tmp/abs", ""] {
        let job = harness.job().with_output(name);
        let (code, codes) = error_codes(&harness, &job);
        assert_eq!(code, ExitCode::from(1), "{:?}", name);
        assert_eq!(codes, vec!["E009"], "{:?}", name);
    }
}

#[test]
fn test_positive_forced_origin() {
    let harness = TestHarness::new();
    let job = harness.job().with_origin(2);
    let (code, codes) = error_codes(&harness, &job);
    assert_eq!(code, ExitCode::from(1));
    assert_eq!(codes, vec!["E008"]);
}

#[test]
fn test_positive_calculated_baseline() {
    let harness = TestHarness::new();
    let mut font = block_font();
    let mut m = GlyphBitmap::solid(5, 7, 0, 7).with_vertical_advance(BLOCK_LINE_HEIGHT + 3);
    m.advance = BLOCK_ADVANCE;
    font.insert('M' as u32, m);

    let job = harness.job().with_baseline(BaselineMode::Calculate);
    let outcome = harness.generate(&job, &mut font);
    assert_eq!(outcome.code, ExitCode::from(1));
    assert_eq!(outcome.report.errors[0].code, "SCAN_004");
    assert!(outcome.report.metrics.is_none());

    // the detected baseline is still fine
    let job = harness.job();
    assert_eq!(harness.generate(&job, &mut font).code, ExitCode::SUCCESS);
}

#[test]
fn test_zero_calculated_baseline_is_accepted() {
    let harness = TestHarness::new();
    let job = harness.job().with_baseline(BaselineMode::Calculate);
    let outcome = harness.generate(&job, &mut block_font());
    assert_eq!(outcome.code, ExitCode::SUCCESS);
    let metrics = outcome.report.metrics.unwrap();
    assert_eq!(metrics.calculated_baseline, 0);
    assert_eq!(metrics.baseline, 0);
    assert_eq!(metrics.detected_baseline, -2);
}

#[test]
fn test_missing_glyph_fails_the_run() {
    let harness = TestHarness::new();
    let mut font = block_font().strict();
    let job = harness.job();
    let outcome = harness.generate(&job, &mut font);
    assert_eq!(outcome.code, ExitCode::from(2));
    assert_eq!(outcome.report.errors[0].code, "SCAN_003");
    assert!(!outcome.report.ok);
}

#[test]
fn test_missing_font_file() {
    let job = FontJob::new("/nonexistent/dir/font.ttf", 12);
    let code = generate::run(&job, json_mode()).unwrap();
    assert_eq!(code, ExitCode::from(1));
}

#[test]
fn test_unreadable_job_file() {
    let harness = TestHarness::new();
    let path = harness.path().join("job.json");
    std::fs::write(&path, r#"{"font": "a.ttf", "size": "large"}"#).unwrap();
    assert!(resolve_job(Some(&path), &JobOverrides::default()).is_err());

    std::fs::write(&path, r#"{"font": "a.ttf", "size": 12, "ranges": [1, 2]}"#).unwrap();
    assert!(resolve_job(Some(&path), &JobOverrides::default()).is_err());
}

#[test]
fn test_command_line_completes_job_file() {
    let harness = TestHarness::new();
    let path = harness.path().join("job.json");
    std::fs::write(&path, r#"{"range": [65, 70], "writers": ["raw"]}"#).unwrap();

    let incomplete = resolve_job(Some(&path), &JobOverrides::default()).unwrap();
    assert!(!validate_job(&incomplete).is_ok());

    let overrides = JobOverrides {
        size: Some(10),
        font: Some(PathBuf::from("fixtures/Block Sans.ttf")),
        out_dir: Some(harness.path().to_path_buf()),
        ..JobOverrides::default()
    };
    let job = resolve_job(Some(&path), &overrides).unwrap();
    assert!(validate_job(&job).is_ok());
    assert_eq!(harness.generate(&job, &mut block_font()).code, ExitCode::SUCCESS);
    assert!(harness.exists("Block_Sans_10_6x10.bin"));
}
