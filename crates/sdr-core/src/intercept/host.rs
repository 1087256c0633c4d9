//! Host download API port and the records it exchanges.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::HostError;

/// Host-assigned download identifier.
pub type DownloadId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadState {
    InProgress,
    Interrupted,
    Complete,
}

/// A download as reported by the host. Never mutated here; changes go
/// through [`DownloadHost`] calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadItem {
    pub id: DownloadId,
    pub url: String,
    /// Full path or suggested name; may be empty before the host picks one.
    #[serde(default)]
    pub filename: String,
    pub state: DownloadState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl DownloadItem {
    /// An in-progress download with no timing or size information.
    pub fn in_progress(id: DownloadId, url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            filename: filename.into(),
            state: DownloadState::InProgress,
            start_time: None,
            file_size: None,
        }
    }

    /// Human-readable size for listings; `Unknown size` when not reported.
    pub fn size_label(&self) -> String {
        match self.file_size {
            Some(bytes) if bytes > 0 => format_file_size(bytes),
            _ => "Unknown size".to_string(),
        }
    }
}

/// Binary units up to GB, at most two decimals, trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

/// What the host should do when the target name already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictAction {
    #[default]
    Uniquify,
    Overwrite,
    Prompt,
}

/// Parameters for a new host download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
    pub conflict_action: ConflictAction,
    pub save_as: bool,
}

impl DownloadRequest {
    /// Re-download of `url` under `filename`, uniquified, without a dialog.
    pub fn renamed(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            conflict_action: ConflictAction::Uniquify,
            save_as: false,
        }
    }
}

/// The host's download-list API.
#[async_trait]
pub trait DownloadHost: Send + Sync {
    async fn cancel(&self, id: DownloadId) -> Result<(), HostError>;

    /// Removes the entry from download history (the file is not touched).
    async fn erase(&self, id: DownloadId) -> Result<(), HostError>;

    /// Starts a new download and returns its id.
    async fn download(&self, request: DownloadRequest) -> Result<DownloadId, HostError>;

    async fn resume(&self, id: DownloadId) -> Result<(), HostError>;

    /// Every download the host still lists.
    async fn search(&self) -> Result<Vec<DownloadItem>, HostError>;
}

/// The `limit` most recently started downloads, newest first.
/// Entries without a start time sort last.
pub async fn recent_downloads(
    host: &dyn DownloadHost,
    limit: usize,
) -> Result<Vec<DownloadItem>, HostError> {
    let mut items = host.search().await?;
    items.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    items.truncate(limit);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_item_uses_host_field_names() {
        let item: DownloadItem = serde_json::from_str(
            r#"{"id":7,"url":"https://e.com/a.zip","filename":"/tmp/a.zip",
                "state":"in_progress","startTime":"2024-03-15T10:00:00Z","fileSize":12}"#,
        )
        .unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.state, DownloadState::InProgress);
        assert_eq!(item.file_size, Some(12));
        assert!(item.start_time.is_some());
    }

    #[test]
    fn missing_filename_defaults_to_empty() {
        let item: DownloadItem =
            serde_json::from_str(r#"{"id":1,"url":"u","state":"complete"}"#).unwrap();
        assert_eq!(item.filename, "");
        assert_eq!(item.state, DownloadState::Complete);
    }

    #[test]
    fn renamed_request_serializes_like_the_host_api() {
        let json = serde_json::to_value(DownloadRequest::renamed("https://e.com/x", "y.bin")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://e.com/x",
                "filename": "y.bin",
                "conflictAction": "uniquify",
                "saveAs": false
            })
        );
    }

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 123_456), "5.12 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }

    #[test]
    fn size_label_hides_missing_sizes() {
        let mut item = DownloadItem::in_progress(1, "u", "a.bin");
        assert_eq!(item.size_label(), "Unknown size");
        item.file_size = Some(0);
        assert_eq!(item.size_label(), "Unknown size");
        item.file_size = Some(2048);
        assert_eq!(item.size_label(), "2 KB");
    }
}
