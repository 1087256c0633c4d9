//! Download interception.
//!
//! The controller observes host download events, runs the rule engine on the
//! bare filename and, when the name changes, renames using the one strategy
//! the host supports:
//! - suggestion: hand a new name to the host before the download starts
//! - cancel-and-restart: cancel, erase, download again under the new name
//! - header rewrite: edit `Content-Disposition` before the host reads it
//!
//! Failures are logged and never retried.

mod content_disposition;
mod controller;
mod error;
mod host;
mod message;
mod path;
mod self_initiated;
mod strategy;

pub use content_disposition::{
    parse_content_disposition_filename, rewrite_content_disposition_filename,
};
pub use controller::{
    Controller, DownloadEvent, Header, Outcome, PassReason, DEFAULT_RECENT_LIMIT,
};
pub use error::{HostError, HostOp, InterceptError};
pub use host::{
    format_file_size, recent_downloads, ConflictAction, DownloadHost, DownloadId, DownloadItem,
    DownloadRequest, DownloadState,
};
pub use message::{ControlMessage, ControlReply};
pub use path::{bare_filename, filename_from_url_path, split_dir};
pub use self_initiated::SelfInitiated;
pub use strategy::{HostCapabilities, InterceptStrategy};
