use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EntryId;

/// One timestamped text record in the remote store.
///
/// Entries are immutable once written. `id` and `created_at` are assigned by the
/// store at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub id: EntryId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ClipboardEntry {
    pub fn new(id: impl Into<EntryId>, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            created_at,
        }
    }
}
