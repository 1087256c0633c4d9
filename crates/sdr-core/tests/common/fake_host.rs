//! In-memory download host that records every call for assertions.
//!
//! New downloads get ids from 100 upwards. A single operation can be made to
//! fail to exercise the partial-failure paths.

use async_trait::async_trait;
use sdr_core::intercept::{DownloadHost, DownloadId, DownloadItem, DownloadRequest, HostError, HostOp};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Cancel(DownloadId),
    Erase(DownloadId),
    Download(DownloadRequest),
    Resume(DownloadId),
    Search,
}

pub struct FakeHost {
    calls: Mutex<Vec<HostCall>>,
    next_id: AtomicI64,
    fail_on: Mutex<Option<HostOp>>,
    listed: Mutex<Vec<DownloadItem>>,
}

impl FakeHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(100),
            fail_on: Mutex::new(None),
            listed: Mutex::new(Vec::new()),
        })
    }

    /// Makes every later call of `op` fail.
    pub fn fail_on(&self, op: HostOp) {
        *self.fail_on.lock().unwrap() = Some(op);
    }

    pub fn set_listed(&self, items: Vec<DownloadItem>) {
        *self.listed.lock().unwrap() = items;
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: HostOp, call: HostCall) -> Result<(), HostError> {
        self.calls.lock().unwrap().push(call);
        if *self.fail_on.lock().unwrap() == Some(op) {
            return Err(HostError::rejected(op, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl DownloadHost for FakeHost {
    async fn cancel(&self, id: DownloadId) -> Result<(), HostError> {
        self.record(HostOp::Cancel, HostCall::Cancel(id))
    }

    async fn erase(&self, id: DownloadId) -> Result<(), HostError> {
        self.record(HostOp::Erase, HostCall::Erase(id))
    }

    async fn download(&self, request: DownloadRequest) -> Result<DownloadId, HostError> {
        self.record(HostOp::Download, HostCall::Download(request))?;
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn resume(&self, id: DownloadId) -> Result<(), HostError> {
        self.record(HostOp::Resume, HostCall::Resume(id))
    }

    async fn search(&self) -> Result<Vec<DownloadItem>, HostError> {
        self.record(HostOp::Search, HostCall::Search)?;
        Ok(self.listed.lock().unwrap().clone())
    }
}
