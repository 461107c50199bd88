//! fontmatrix CLI library.
//!
//! This crate provides the job loading and the `generate` and `check`
//! commands behind the `fontmatrix` binary, so they can be driven directly
//! from tests.

pub mod commands;
pub mod input;
