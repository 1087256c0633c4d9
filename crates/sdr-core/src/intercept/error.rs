//! Error types for host operations and controller setup.

use std::fmt;

/// Host download operation, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    Cancel,
    Erase,
    Download,
    Resume,
    Search,
}

impl fmt::Display for HostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HostOp::Cancel => "cancel",
            HostOp::Erase => "erase",
            HostOp::Download => "download",
            HostOp::Resume => "resume",
            HostOp::Search => "search",
        };
        f.write_str(s)
    }
}

/// Failure reported by the host's download API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host rejected the call (unknown id, download already finished, ...).
    #[error("{op} rejected by host: {reason}")]
    Rejected { op: HostOp, reason: String },
    /// The host has no download-list API at all.
    #[error("host has no download API")]
    Unavailable,
}

impl HostError {
    pub fn rejected(op: HostOp, reason: impl Into<String>) -> Self {
        HostError::Rejected {
            op,
            reason: reason.into(),
        }
    }
}

/// Error building a [`Controller`](super::Controller).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterceptError {
    #[error("host offers no way to intercept downloads")]
    NoStrategy,
}
