//! Interception strategy selection from host capabilities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the host lets us hook into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCapabilities {
    /// The host asks for a filename before it creates the download.
    #[serde(default)]
    pub determining_filename: bool,
    /// The host exposes a download list (created events, cancel/erase/download).
    #[serde(default)]
    pub downloads_api: bool,
    /// The host lets us inspect and modify response headers.
    #[serde(default)]
    pub response_headers: bool,
}

/// How renames are carried out. Fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptStrategy {
    /// Supply the new name before the download starts.
    Suggest,
    /// Cancel the started download and fetch it again under the new name.
    CancelAndRestart,
    /// Rewrite the filename in the `Content-Disposition` response header.
    HeaderRewrite,
}

impl InterceptStrategy {
    /// Picks the best strategy the host supports, preferring the ones that
    /// do not restart the transfer.
    pub fn probe(caps: &HostCapabilities) -> Option<InterceptStrategy> {
        if caps.determining_filename {
            Some(InterceptStrategy::Suggest)
        } else if caps.downloads_api {
            Some(InterceptStrategy::CancelAndRestart)
        } else if caps.response_headers {
            Some(InterceptStrategy::HeaderRewrite)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InterceptStrategy::Suggest => "suggest",
            InterceptStrategy::CancelAndRestart => "cancel-and-restart",
            InterceptStrategy::HeaderRewrite => "header-rewrite",
        }
    }
}

impl fmt::Display for InterceptStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
