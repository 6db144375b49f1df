//! # cs-platform
//!
//! Platform-specific implementations for clipsync.
//!
//! This crate holds the adapters that touch the operating system: the
//! system clipboard, per-user directories and the in-process history
//! consumer channel.

pub mod adapters;
pub mod app_dirs;
pub mod clipboard;

pub use adapters::BroadcastHistoryView;
pub use app_dirs::{AppDirs, AppDirsError, DirsAppDirsAdapter};
pub use clipboard::LocalClipboard;
