//! fontmatrix End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full generation flow:
//!
//! - Generation: job -> written files and run report
//! - Validation: rejected jobs and their exit codes
//! - **Determinism**: byte-identical output across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fontmatrix-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use determinism::{compute_hash, verify_determinism, DeterminismResult};
pub use fixtures::{block_font, tall_bar_font, BLOCK_BASENAME};
pub use harness::{decode_gray_png, TestHarness};
