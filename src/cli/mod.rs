//! CLI module
//!
//! Command-line interface over the service client.
//!
//! # Commands
//!
//! - `list-configs` - List collected configurations (page by page, or `--all`)
//! - `get-settings` - Show collection settings
//! - `replace-settings` - Replace collection settings
//! - `status` - Show resource collection status
//! - `reconcile` - Trigger a manual reconcile

mod commands;
mod runner;

pub use commands::{Cli, Commands, ListArgs, OutputFormat, ReplaceSettingsArgs};
pub use runner::{render, Runner};
