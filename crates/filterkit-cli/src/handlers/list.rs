//! List command handler

use crate::error::Result;
use crate::output::OutputWriter;
use filterkit_core::FilterRegistry;

/// Handle the list command
pub fn handle_list(registry: &FilterRegistry, output: &mut OutputWriter) -> Result<()> {
    tracing::debug!(count = registry.len(), "Listing filters");
    output.names(&registry.names())
}
