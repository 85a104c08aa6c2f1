//! Apply command handler

use super::parse_value;
use crate::cli::ApplyArgs;
use crate::config;
use crate::error::{Error, ErrorContext, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use filterkit_core::{Context, FilterRegistry, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Handle the apply command
#[instrument(skip_all, fields(filter = %args.filter, args = args.args.len()))]
pub fn handle_apply(
    args: ApplyArgs,
    registry: &FilterRegistry,
    ctx: &Context,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("apply_command", &args.filter);

    let subject = match (&args.input, &args.input_file) {
        (Some(text), _) => parse_value(text),
        (None, Some(path)) => load_subject(path)?,
        (None, None) => return Err(Error::invalid_args("either --input or --input-file is required")),
    };
    let filter_args: Vec<Value> = args.args.iter().map(|raw| parse_value(raw)).collect();
    debug!(subject = subject.type_name(), "Parsed filter input");

    let result = registry.apply(&args.filter, ctx, &subject, &filter_args)?;
    info!(result = result.type_name(), "Filter applied");

    output.value(&result)
}

/// Read a subject value from a JSON or YAML file
fn load_subject(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("File read successfully, {} bytes", content.len());

    let json: serde_json::Value = if config::is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|_e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|_e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })?
    };

    Ok(Value::from(json))
}
