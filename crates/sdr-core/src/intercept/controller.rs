//! Per-event rename decisions and strategy execution.

use std::sync::Arc;

use super::content_disposition::{
    parse_content_disposition_filename, rewrite_content_disposition_filename,
};
use super::error::{HostError, InterceptError};
use super::host::{
    recent_downloads, ConflictAction, DownloadHost, DownloadId, DownloadItem, DownloadRequest,
    DownloadState,
};
use super::message::{ControlMessage, ControlReply};
use super::path::{bare_filename, filename_from_url_path, split_dir};
use super::self_initiated::SelfInitiated;
use super::strategy::{HostCapabilities, InterceptStrategy};
use crate::config::SdrConfig;
use crate::rules::apply_rules;
use crate::settings::{KeyValueStore, RuleSet};

/// A single response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Download lifecycle notifications delivered by the host.
#[derive(Debug, Clone)]
pub enum DownloadEvent {
    /// The host is about to pick a filename and accepts a suggestion.
    DeterminingFilename(DownloadItem),
    /// A download was created with its filename already fixed.
    Created(DownloadItem),
    /// Response headers of an in-flight request.
    HeadersReceived(Vec<Header>),
}

/// Why an event led to no change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    /// Rules switched off, empty, or unreadable.
    Disabled,
    NoFilename,
    /// The rules produced the same name.
    Unchanged,
    /// A download this controller started itself.
    SelfInitiated,
    NotInProgress,
    /// No usable `Content-Disposition` filename.
    NoDisposition,
    /// Event kind not handled by the active strategy.
    WrongStrategy,
}

/// Terminal state of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passthrough(PassReason),
    /// Hand this name back to the host's filename callback.
    Suggested {
        filename: String,
        conflict_action: ConflictAction,
    },
    Restarted {
        original: DownloadId,
        replacement: DownloadId,
        filename: String,
    },
    /// The full header list to return to the host.
    HeadersRewritten(Vec<Header>),
    /// A host call failed part way; the original download may be cancelled.
    Failed { id: DownloadId, error: HostError },
}

/// Watches download events and renames according to the stored rule set.
///
/// Shared between concurrently running handlers (wrap in `Arc`). The only
/// state across events is the set of self-initiated download ids.
pub struct Controller {
    store: Arc<dyn KeyValueStore>,
    host: Arc<dyn DownloadHost>,
    strategy: InterceptStrategy,
    self_initiated: SelfInitiated,
    recent_limit: usize,
}

/// Downloads listed by [`Controller::recent_downloads`] unless configured.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

impl Controller {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        host: Arc<dyn DownloadHost>,
        strategy: InterceptStrategy,
        self_initiated_capacity: usize,
    ) -> Self {
        tracing::info!(%strategy, "download interception ready");
        Self {
            store,
            host,
            strategy,
            self_initiated: SelfInitiated::new(self_initiated_capacity),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Strategy, id capacity and listing size all taken from `cfg`.
    pub fn from_config(
        store: Arc<dyn KeyValueStore>,
        host: Arc<dyn DownloadHost>,
        cfg: &SdrConfig,
    ) -> Result<Self, InterceptError> {
        let ctl = Self::for_host(store, host, &cfg.capabilities, cfg.self_initiated_capacity)?;
        Ok(ctl.with_recent_limit(cfg.recent_limit))
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Builds a controller with the strategy probed from `caps`.
    pub fn for_host(
        store: Arc<dyn KeyValueStore>,
        host: Arc<dyn DownloadHost>,
        caps: &HostCapabilities,
        self_initiated_capacity: usize,
    ) -> Result<Self, InterceptError> {
        let strategy = InterceptStrategy::probe(caps).ok_or(InterceptError::NoStrategy)?;
        Ok(Self::new(store, host, strategy, self_initiated_capacity))
    }

    pub fn strategy(&self) -> InterceptStrategy {
        self.strategy
    }

    /// Number of restarted downloads whose created event has not arrived yet.
    pub fn pending_self_initiated(&self) -> usize {
        self.self_initiated.len()
    }

    pub async fn handle(&self, event: DownloadEvent) -> Outcome {
        match (self.strategy, event) {
            (InterceptStrategy::Suggest, DownloadEvent::DeterminingFilename(item)) => {
                self.suggest(&item).await
            }
            (InterceptStrategy::CancelAndRestart, DownloadEvent::Created(item)) => {
                self.restart(&item).await
            }
            (InterceptStrategy::HeaderRewrite, DownloadEvent::HeadersReceived(headers)) => {
                self.rewrite_headers(headers).await
            }
            (strategy, event) => {
                tracing::trace!(%strategy, ?event, "event not handled by active strategy");
                Outcome::Passthrough(PassReason::WrongStrategy)
            }
        }
    }

    /// Renamed bare filename if rules are active, for showing before a rename.
    pub async fn preview(&self, filename: &str) -> Option<String> {
        let rules = self.active_rules().await?;
        Some(apply_rules(filename, &rules.rules))
    }

    /// The host's newest downloads, at most the configured number.
    pub async fn recent_downloads(&self) -> Result<Vec<DownloadItem>, HostError> {
        recent_downloads(self.host.as_ref(), self.recent_limit).await
    }

    pub async fn handle_message(&self, message: ControlMessage) -> ControlReply {
        match message {
            ControlMessage::ResumeDownload { download_id } => {
                match self.host.resume(download_id).await {
                    Ok(()) => {
                        tracing::info!(id = download_id, "resumed download");
                        ControlReply { success: true }
                    }
                    Err(e) => {
                        tracing::warn!(id = download_id, "resume failed: {e}");
                        ControlReply { success: false }
                    }
                }
            }
        }
    }

    async fn suggest(&self, item: &DownloadItem) -> Outcome {
        let Some(rules) = self.active_rules().await else {
            return Outcome::Passthrough(PassReason::Disabled);
        };
        if item.filename.is_empty() {
            return Outcome::Passthrough(PassReason::NoFilename);
        }
        let (dir, name) = split_dir(&item.filename);
        let renamed = apply_rules(name, &rules.rules);
        if renamed == name {
            return Outcome::Passthrough(PassReason::Unchanged);
        }
        tracing::info!(id = item.id, from = name, to = %renamed, "suggesting filename");
        Outcome::Suggested {
            filename: format!("{dir}{renamed}"),
            conflict_action: ConflictAction::Uniquify,
        }
    }

    async fn restart(&self, item: &DownloadItem) -> Outcome {
        if self.self_initiated.take(item.id) {
            tracing::debug!(id = item.id, "skipping self-initiated download");
            return Outcome::Passthrough(PassReason::SelfInitiated);
        }
        if item.state != DownloadState::InProgress {
            return Outcome::Passthrough(PassReason::NotInProgress);
        }
        let Some(rules) = self.active_rules().await else {
            return Outcome::Passthrough(PassReason::Disabled);
        };
        let original = match bare_filename(&item.filename) {
            Some(name) => name.to_string(),
            None if item.filename.is_empty() => match filename_from_url_path(&item.url) {
                Some(name) => name,
                None => return Outcome::Passthrough(PassReason::NoFilename),
            },
            None => return Outcome::Passthrough(PassReason::NoFilename),
        };
        let renamed = apply_rules(&original, &rules.rules);
        if renamed == original {
            return Outcome::Passthrough(PassReason::Unchanged);
        }

        match self.cancel_and_redownload(item, &renamed).await {
            Ok(replacement) => {
                self.self_initiated.insert(replacement);
                tracing::info!(
                    id = item.id,
                    replacement,
                    from = %original,
                    to = %renamed,
                    "restarted download under new name"
                );
                Outcome::Restarted {
                    original: item.id,
                    replacement,
                    filename: renamed,
                }
            }
            Err(error) => {
                tracing::error!(id = item.id, url = %item.url, "rename failed, not retrying: {error}");
                Outcome::Failed { id: item.id, error }
            }
        }
    }

    /// Not atomic: once `cancel` succeeds, a later failure leaves the
    /// original download cancelled.
    async fn cancel_and_redownload(
        &self,
        item: &DownloadItem,
        filename: &str,
    ) -> Result<DownloadId, HostError> {
        self.host.cancel(item.id).await?;
        self.host.erase(item.id).await?;
        self.host
            .download(DownloadRequest::renamed(&item.url, filename))
            .await
    }

    async fn rewrite_headers(&self, mut headers: Vec<Header>) -> Outcome {
        let Some(idx) = headers
            .iter()
            .position(|h| h.name.eq_ignore_ascii_case("content-disposition"))
        else {
            return Outcome::Passthrough(PassReason::NoDisposition);
        };
        let Some(original) = parse_content_disposition_filename(&headers[idx].value) else {
            return Outcome::Passthrough(PassReason::NoDisposition);
        };
        let Some(rules) = self.active_rules().await else {
            return Outcome::Passthrough(PassReason::Disabled);
        };
        let Some(name) = bare_filename(&original) else {
            return Outcome::Passthrough(PassReason::NoFilename);
        };
        let renamed = apply_rules(name, &rules.rules);
        if renamed == name {
            return Outcome::Passthrough(PassReason::Unchanged);
        }
        let Some(value) = rewrite_content_disposition_filename(&headers[idx].value, &renamed) else {
            return Outcome::Passthrough(PassReason::NoDisposition);
        };
        tracing::info!(from = name, to = %renamed, "rewrote Content-Disposition");
        headers[idx].value = value;
        Outcome::HeadersRewritten(headers)
    }

    /// Reads the rule set fresh. Read failures count as disabled.
    async fn active_rules(&self) -> Option<RuleSet> {
        match RuleSet::load(self.store.as_ref()).await {
            Ok(set) if set.is_active() => Some(set),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("could not read rename rules, treating as disabled: {e}");
                None
            }
        }
    }
}
