//! ECR Stale Images Library
//!
//! Library root for the ecr-stale-images crate: registry and cluster clients,
//! the classification scan, and the command line front end.

pub mod cli;
pub mod error;
pub mod image;
pub mod logging;
pub mod registry;
pub mod scan;
pub mod workload;

pub use error::{Result, ScanError};
pub use logging::Logger;
pub use scan::{ScanReport, Scanner};
