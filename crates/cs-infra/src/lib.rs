//! # cs-infra
//!
//! Infrastructure implementations of the `cs-core` ports: the remote sync
//! stores, the in-process clipboard change origin marker and the system clock.

pub mod clipboard;
pub mod store;
pub mod time;

pub use clipboard::InMemoryClipboardChangeOrigin;
pub use store::{DisabledSyncStore, InMemorySyncStore, PostgrestSyncStore};
pub use time::SystemClock;
