//! Sync store adapters.
//!
//! - [`PostgrestSyncStore`]: hosted table behind a PostgREST-compatible API.
//! - [`DisabledSyncStore`]: degraded mode when credentials are missing.
//! - [`InMemorySyncStore`]: process-local store for offline runs and tests.

mod disabled;
mod in_memory;
mod postgrest;
mod row;

pub use disabled::DisabledSyncStore;
pub use in_memory::InMemorySyncStore;
pub use postgrest::PostgrestSyncStore;
