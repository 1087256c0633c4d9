//! Ids of downloads the controller started itself.
//!
//! A cancel-and-restart issues a new download, and the host reports it back
//! through the same created event. Recording its id lets the handler skip
//! it once instead of renaming it again.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::host::DownloadId;

/// Bounded set of pending self-initiated ids. Each id matches at most once.
#[derive(Debug)]
pub struct SelfInitiated {
    capacity: usize,
    ids: Mutex<VecDeque<DownloadId>>,
}

impl SelfInitiated {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            ids: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Records `id`. When full, the oldest pending id is forgotten.
    pub fn insert(&self, id: DownloadId) {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        if ids.contains(&id) {
            return;
        }
        if ids.len() >= self.capacity {
            if let Some(evicted) = ids.pop_front() {
                tracing::warn!(evicted, "self-initiated id set full, dropping oldest");
            }
        }
        ids.push_back(id);
    }

    /// Removes `id` and reports whether it was present.
    pub fn take(&self, id: DownloadId) -> bool {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        match ids.iter().position(|&pending| pending == id) {
            Some(pos) => {
                ids.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
