//! Translate command handler

use crate::cli::{OutputFormat, TranslateArgs};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use filterkit_core::filters::date::DateKind;
use filterkit_core::pattern::{format_translated, translate};
use serde::Serialize;

/// Result of translating a date pattern
#[derive(Debug, Serialize)]
struct PatternTranslation {
    pattern: String,
    strftime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rendered: Option<String>,
}

/// Handle the translate command
pub fn handle_translate(args: TranslateArgs, output: &mut OutputWriter) -> Result<()> {
    let strftime = translate(&args.pattern);
    tracing::debug!(pattern = %args.pattern, strftime = %strftime, "Translated pattern");

    let rendered = match &args.at {
        Some(at) => {
            let instant = DateKind::DateTime.parse(at).ok_or_else(|| {
                Error::invalid_args(format!("'{}' is not a YYYY-MM-DD HH:MM:SS value", at))
            })?;
            let text = format_translated(&instant, &strftime)
                .ok_or_else(|| Error::other(format!("pattern '{}' cannot be rendered", args.pattern)))?;
            Some(text)
        }
        None => None,
    };

    if output.format() != OutputFormat::Human {
        return output.data(&PatternTranslation {
            pattern: args.pattern,
            strftime,
            rendered,
        });
    }

    output.writeln(&strftime)?;
    if let Some(text) = rendered {
        output.section("Rendered")?;
        output.writeln(&text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::testing::writer;

    fn run(pattern: &str, at: Option<&str>, format: OutputFormat) -> Result<String> {
        let (mut output, buffer) = writer(format);
        handle_translate(
            TranslateArgs {
                pattern: pattern.to_string(),
                at: at.map(str::to_string),
            },
            &mut output,
        )?;
        Ok(buffer.contents())
    }

    #[test]
    fn test_translate_for_humans() {
        assert_eq!(run("dd/MM/yyyy", None, OutputFormat::Human).unwrap(), "%d/%m/%Y\n");
    }

    #[test]
    fn test_translate_and_render() {
        let out = run("hh:mm", Some("2023-07-04 14:05:09"), OutputFormat::Human).unwrap();
        assert_eq!(out, "%I:%M\n=== Rendered ===\n02:05\n");
    }

    #[test]
    fn test_translate_as_json() {
        let out = run("yyyy", Some("2023-07-04 14:05:09"), OutputFormat::Json).unwrap();
        assert_eq!(out, "{\"pattern\":\"yyyy\",\"strftime\":\"%Y\",\"rendered\":\"2023\"}\n");

        let out = run("yyyy", None, OutputFormat::Json).unwrap();
        assert_eq!(out, "{\"pattern\":\"yyyy\",\"strftime\":\"%Y\"}\n");
    }

    #[test]
    fn test_bad_render_value() {
        let err = run("yyyy", Some("2023-07-04"), OutputFormat::Human).unwrap_err();
        assert!(matches!(err, Error::InvalidArgs(_)));
    }
}
