use async_trait::async_trait;
use cs_core::ports::ClipboardChangeOriginPort;
use cs_core::ClipboardChangeOrigin;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Process-local origin markers, matched by text and expired by ttl.
pub struct InMemoryClipboardChangeOrigin {
    pending: Mutex<Vec<PendingOrigin>>,
}

struct PendingOrigin {
    origin: ClipboardChangeOrigin,
    text: String,
    expires_at: Instant,
}

impl InMemoryClipboardChangeOrigin {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
        }
    }

    #[cfg(test)]
    async fn pending_len(&self) -> usize {
        self.pending.lock().await.len()
    }
}

impl Default for InMemoryClipboardChangeOrigin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardChangeOriginPort for InMemoryClipboardChangeOrigin {
    async fn set_next_origin(&self, origin: ClipboardChangeOrigin, text: &str, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or(now);
        let mut pending = self.pending.lock().await;
        pending.retain(|p| p.expires_at >= now && p.text != text);
        pending.push(PendingOrigin {
            origin,
            text: text.to_string(),
            expires_at,
        });
        debug!(origin = origin.as_str(), pending = pending.len(), "origin marker set");
    }

    async fn consume_origin_or_default(
        &self,
        text: &str,
        default_origin: ClipboardChangeOrigin,
    ) -> ClipboardChangeOrigin {
        let now = Instant::now();
        let mut pending = self.pending.lock().await;
        let matched = pending
            .iter()
            .find(|p| p.expires_at >= now && p.text == text)
            .map(|p| p.origin);

        // The clipboard moved on; writes it never showed are stale
        let dropped = pending.len() - usize::from(matched.is_some());
        pending.clear();
        if dropped > 0 {
            debug!(dropped, "stale origin markers dropped");
        }

        matched.unwrap_or(default_origin)
    }

    async fn discard_origin(&self, text: &str) {
        self.pending.lock().await.retain(|p| p.text != text);
    }
}
