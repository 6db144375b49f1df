//! Wire rows of the remote `clipboard` table.

use chrono::{DateTime, NaiveDateTime, Utc};
use cs_core::{ClipboardEntry, EntryId};
use serde::{Deserialize, Deserializer, Serialize};

/// Row sent on insert; the store assigns `id` and `created_at`.
#[derive(Debug, Serialize)]
pub(crate) struct NewEntryRow<'a> {
    pub text: &'a str,
}

/// Row returned by `select=id,text,created_at`.
#[derive(Debug, Deserialize)]
pub(crate) struct EntryRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntryId,
    pub text: Option<String>,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
}

impl EntryRow {
    /// Rows without text are not valid entries.
    pub fn into_entry(self) -> Option<ClipboardEntry> {
        match self.text {
            Some(text) if !text.is_empty() => Some(ClipboardEntry {
                id: self.id,
                text,
                created_at: self.created_at,
            }),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<EntryId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => EntryId::from(n),
        RawId::Text(s) => EntryId::from_string(s),
    })
}

/// Accepts RFC 3339 (`timestamptz`) and zone-less (`timestamp`, read as UTC) values.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
