//! Process bootstrap: configuration, logging, wiring and the run modes.

pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_dotenv, resolve_config};
pub use run::{print_history, push_text, render_history, run_sync};
pub use wiring::{build_sync_store, start_sync, StoreMode, SyncSession};
