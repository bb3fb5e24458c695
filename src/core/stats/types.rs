//! Core types for the stats check: verdict, outcome, and error taxonomy.

use std::fmt;
use std::path::PathBuf;

/// Monitoring verdict, in increasing order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckStatus {
    /// Every threshold rule passed.
    Ok,
    /// A warning-level rule fired.
    Warning,
    /// A critical-level rule fired.
    Critical,
    /// The check could not be performed (fetch or configuration failure).
    #[default]
    Unknown,
}

impl CheckStatus {
    /// Conventional monitoring exit code: OK 0, WARNING 1, CRITICAL 2,
    /// UNKNOWN 3.
    pub fn exit_code(self) -> i32 {
        match self {
            CheckStatus::Ok => 0,
            CheckStatus::Warning => 1,
            CheckStatus::Critical => 2,
            CheckStatus::Unknown => 3,
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "OK"),
            CheckStatus::Warning => write!(f, "WARNING"),
            CheckStatus::Critical => write!(f, "CRITICAL"),
            CheckStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Terminal output of the evaluator: a verdict plus the summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckOutcome {
    pub fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Everything that can go wrong before evaluation. All variants are fatal to
/// the single-shot process and surface as UNKNOWN; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("No service specified")]
    NoServiceSpecified,

    #[error("invalid service name pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("failed to read stats from socket {path}: {source}")]
    Socket {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch stats from {url}: {source}")]
    Http {
        url: String,
        source: Box<ureq::Error>,
    },

    #[error("{url} returned HTTP status {status}")]
    HttpStatus { url: String, status: u16 },
}
