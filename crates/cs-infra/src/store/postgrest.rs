use anyhow::Context;
use async_trait::async_trait;
use cs_core::ports::{SyncStoreError, SyncStorePort};
use cs_core::{ClipboardEntry, StoreCredentials};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use tracing::{debug, debug_span, warn, Instrument};

use super::row::{EntryRow, NewEntryRow};

const SELECT_COLUMNS: &str = "id,text,created_at";
const NEWEST_FIRST: &str = "created_at.desc,id.desc";
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Remote store backed by a PostgREST-compatible HTTP API.
///
/// Requests authenticate with the access key both as `apikey` header and as a
/// bearer token. The client timeout bounds every call; there is no retry here,
/// the next poll tick is the retry.
pub struct PostgrestSyncStore {
    client: Client,
    endpoint: String,
}

impl PostgrestSyncStore {
    pub fn new(credentials: &StoreCredentials) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&credentials.key)
            .context("store key is not a valid header value")?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", credentials.key))
            .context("store key is not a valid bearer token")?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(credentials.timeout)
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client for sync store")?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                credentials.url.trim_end_matches('/'),
                credentials.table
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SyncStorePort for PostgrestSyncStore {
    async fn insert(&self, text: &str) -> Result<(), SyncStoreError> {
        let span = debug_span!("infra.store.postgrest.insert", text_bytes = text.len());

        async {
            let response = self
                .client
                .post(&self.endpoint)
                .header("Prefer", "return=minimal")
                .json(&[NewEntryRow { text }])
                .send()
                .await
                .map_err(map_transport_error)?;

            ensure_success(response).await?;
            debug!("Inserted clipboard entry");
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn query_newest(&self, limit: usize) -> Result<Vec<ClipboardEntry>, SyncStoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let span = debug_span!("infra.store.postgrest.query_newest", limit);

        async {
            let limit = limit.to_string();
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("select", SELECT_COLUMNS),
                    ("order", NEWEST_FIRST),
                    ("limit", limit.as_str()),
                ])
                .send()
                .await
                .map_err(map_transport_error)?;

            let rows: Vec<EntryRow> = ensure_success(response)
                .await?
                .json()
                .await
                .map_err(|e| SyncStoreError::Decode(e.to_string()))?;

            let total = rows.len();
            let entries: Vec<ClipboardEntry> =
                rows.into_iter().filter_map(EntryRow::into_entry).collect();
            if entries.len() != total {
                warn!(
                    dropped = total - entries.len(),
                    "Ignoring store rows without text"
                );
            }

            debug!(count = entries.len(), "Fetched newest clipboard entries");
            Ok(entries)
        }
        .instrument(span)
        .await
    }
}

fn map_transport_error(err: reqwest::Error) -> SyncStoreError {
    if err.is_timeout() {
        SyncStoreError::Unavailable("request timed out".to_string())
    } else if err.is_decode() {
        SyncStoreError::Decode(err.to_string())
    } else {
        SyncStoreError::Unavailable(err.to_string())
    }
}

async fn ensure_success(response: Response) -> Result<Response, SyncStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SyncStoreError::Rejected {
        status: status.as_u16(),
        message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    })
}
