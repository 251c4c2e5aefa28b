//! Command line interface module
//!
//! This module provides argument parsing, validation into a [`ScanConfig`], and the
//! [`Runner`] that connects to the registry and cluster and performs the scan.

pub mod args;
pub mod config;
pub mod operation_mode;
pub mod runner;

pub use args::Args;
pub use config::ScanConfig;
pub use operation_mode::ScanMode;
pub use runner::Runner;
