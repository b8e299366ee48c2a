//! Crate-internal test suites and shared helpers.

pub mod common;
mod property;
