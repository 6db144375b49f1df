//! OS clipboard access (text only).

mod common;

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use clipboard_rs::ClipboardContext;
use cs_core::ports::SystemClipboardPort;

use common::CommonClipboardImpl;

/// System clipboard backed by `clipboard-rs`.
///
/// The context is not reentrant; every access goes through one mutex.
pub struct LocalClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl LocalClipboard {
    pub fn new() -> Result<Self> {
        let context =
            CommonClipboardImpl::new_context().context("failed to open system clipboard")?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, ClipboardContext>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("clipboard context lock poisoned"))
    }
}

impl SystemClipboardPort for LocalClipboard {
    fn read_text(&self) -> Result<Option<String>> {
        let ctx = self.lock()?;
        CommonClipboardImpl::read_text(&ctx).context("failed to read clipboard text")
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let ctx = self.lock()?;
        CommonClipboardImpl::write_text(&ctx, text).context("failed to write clipboard text")
    }
}
