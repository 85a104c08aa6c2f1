//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod apply;
mod completions;
mod list;
mod translate;

pub use apply::handle_apply;
pub use completions::handle_completions;
pub use list::handle_list;
pub use translate::handle_translate;

use filterkit_core::Value;

/// Parse a command-line value as JSON, falling back to a plain string
pub(crate) fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(raw),
    }
}
