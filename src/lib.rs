//! clipsync: keeps the clipboard of several devices in sync through one
//! hosted table.

pub mod bootstrap;
pub mod cli;

pub use cli::{run_cli, Cli, Command};
