//! Command-line argument parsing
//!
//! Flags are accepted both Go-style (`-days 30`, `-days=30`) and GNU-style
//! (`--days 30`). Single-dash long names are rewritten before clap sees them.

use clap::Parser;
use std::ffi::OsString;

use crate::scan::DEFAULT_THRESHOLD_DAYS;

/// Long flag names that may be written with a single dash
const LONG_FLAGS: &[&str] = &["days", "region", "mode", "verbose", "help", "version"];

#[derive(Parser, Debug, Clone)]
#[command(name = "ecr-stale-images")]
#[command(about = "Report ECR images that were never pulled or not pulled for a number of days")]
#[command(version)]
pub struct Args {
    /// Number of days to evaluate against lastPulledTime
    #[arg(
        long = "days",
        default_value_t = DEFAULT_THRESHOLD_DAYS,
        help = "Number of days to evaluate against lastPulledTime"
    )]
    pub days: u32,

    /// AWS region of the registry
    #[arg(
        long = "region",
        default_value = "us-east-1",
        help = "AWS region where the ECR is running"
    )]
    pub region: String,

    /// Operation mode
    #[arg(
        long = "mode",
        default_value = "ecr",
        help = "Mode of operation: 'ecr' for ECR cleanup, 'k8s' for Kubernetes pod checking"
    )]
    pub mode: String,

    /// Verbose output
    #[arg(
        long = "verbose",
        short = 'v',
        help = "Log skipped images and collaborator calls at DEBUG level"
    )]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse_from(normalize_flags(std::env::args_os()))
    }

    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Args::try_parse_from(normalize_flags(args))
    }
}

/// Rewrite `-name` / `-name=value` into `--name` / `--name=value` for known
/// long flags. Everything after a bare `--` is left untouched.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(text) => single_dash_long(text),
            None => None,
        };
        normalized.push(rewritten.map(OsString::from).unwrap_or(arg));
    }

    normalized
}

fn single_dash_long(text: &str) -> Option<String> {
    let body = text.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let name = body.split('=').next().unwrap_or(body);
    LONG_FLAGS
        .contains(&name)
        .then(|| format!("--{}", body))
}
