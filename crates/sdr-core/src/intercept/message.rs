//! Messages from the UI to the controller.

use serde::{Deserialize, Serialize};

use super::host::DownloadId;

/// Wire shape: `{"action":"resumeDownload","downloadId":42}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ControlMessage {
    ResumeDownload {
        #[serde(rename = "downloadId")]
        download_id: DownloadId,
    },
}

/// Acknowledgement sent back for every [`ControlMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlReply {
    pub success: bool,
}
