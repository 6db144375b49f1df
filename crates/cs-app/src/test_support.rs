//! Port doubles shared by the unit tests of this crate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use cs_core::ports::{
    HistoryViewError, HistoryViewPort, SyncStoreError, SyncStorePort, SystemClipboardPort,
};
use cs_core::ClipboardEntry;
use mockall::mock;

mock! {
    pub SyncStore {}

    #[async_trait]
    impl SyncStorePort for SyncStore {
        async fn insert(&self, text: &str) -> Result<(), SyncStoreError>;
        async fn query_newest(&self, limit: usize) -> Result<Vec<ClipboardEntry>, SyncStoreError>;
    }
}

/// Clipboard holding one optional text, recording every write.
#[derive(Default)]
pub struct FakeClipboard {
    current: Mutex<Option<String>>,
    writes: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeClipboard {
    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::default();
        clipboard.set(text);
        clipboard
    }

    /// Simulate the user copying `text`.
    pub fn set(&self, text: &str) {
        *self.current.lock().unwrap() = Some(text.to_string());
    }

    pub fn current(&self) -> Option<String> {
        self.current.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SystemClipboardPort for FakeClipboard {
    fn read_text(&self) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("clipboard busy"));
        }
        Ok(self.current())
    }

    fn write_text(&self, text: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("clipboard locked"));
        }
        self.set(text);
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// History consumer recording every push.
#[derive(Default)]
pub struct RecordingHistoryView {
    pushes: Mutex<Vec<Vec<String>>>,
}

impl RecordingHistoryView {
    pub fn pushes(&self) -> Vec<Vec<String>> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryViewPort for RecordingHistoryView {
    async fn publish_history(&self, entries: Vec<String>) -> Result<(), HistoryViewError> {
        self.pushes.lock().unwrap().push(entries);
        Ok(())
    }
}
