use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Store-assigned identifier of a clipboard entry.
///
/// Remote stores hand out numeric or textual keys; both are carried as text
/// because the sync loop only ever compares ids for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl_id!(EntryId);
