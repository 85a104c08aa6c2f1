//! String filters
//!
//! Subjects are coerced to strings first, so numbers format the same way they
//! would render in a template.
//!
//! Copyright (c) 2025 Filterkit Team
//! Licensed under the Apache-2.0 license

use crate::context::Context;
use crate::value::Value;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::OnceLock;

static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
static TAG: OnceLock<Regex> = OnceLock::new();
static ALLOWED_TAG: OnceLock<Regex> = OnceLock::new();
static FORMAT_SPEC: OnceLock<Regex> = OnceLock::new();

/// Largest `%.Nf` precision; wider requests are clamped to it
const MAX_FORMAT_PRECISION: usize = 20;

/// `upper`
pub fn upper(_ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    Value::String(value.coerce_string().to_uppercase())
}

/// `lower`
pub fn lower(_ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    Value::String(value.coerce_string().to_lowercase())
}

/// `capitalize`: upper-case the first character, leave the rest alone
pub fn capitalize(_ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    let text = value.coerce_string();
    let mut chars = text.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Value::String(capitalized)
}

/// `title`: upper-case the first letter of every word
pub fn title(_ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    let text = value.coerce_string();
    let mut titled = String::with_capacity(text.len());
    let mut previous = ' ';

    for c in text.chars() {
        let at_word_start = !(previous.is_alphanumeric() || previous == '_');
        if at_word_start {
            titled.extend(c.to_uppercase());
        } else {
            titled.push(c);
        }
        previous = c;
    }

    Value::String(titled)
}

/// `trim(characters?, side = "both")`
pub fn trim(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let text = value.coerce_string();
    let mask: Option<Vec<char>> = args
        .first()
        .filter(|mask| !mask.is_null())
        .map(|mask| mask.coerce_string().chars().collect());
    let side = args
        .get(1)
        .map(Value::coerce_string)
        .unwrap_or_else(|| "both".to_string());

    let strip = |c: char| match &mask {
        Some(mask) => mask.contains(&c),
        None => c.is_whitespace(),
    };

    let trimmed = match side.as_str() {
        "both" => text.trim_matches(strip),
        "left" => text.trim_start_matches(strip),
        "right" => text.trim_end_matches(strip),
        _ => return ctx.degrade("trim", "side must be both, left or right"),
    };
    Value::String(trimmed.to_string())
}

/// RFC 3986 percent-encoding: only unreserved characters stay literal
fn raw_url_encode(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// `url_encode`: percent-encode a string, or build a query string from a
/// collection
pub fn url_encode(_ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut query = url::form_urlencoded::Serializer::new(String::new());
            for (key, item) in map {
                query.append_pair(key, &item.coerce_string());
            }
            Value::String(query.finish())
        }
        Value::Sequence(items) => {
            let mut query = url::form_urlencoded::Serializer::new(String::new());
            for (index, item) in items.iter().enumerate() {
                query.append_pair(&index.to_string(), &item.coerce_string());
            }
            Value::String(query.finish())
        }
        _ => Value::String(raw_url_encode(&value.coerce_string())),
    }
}

/// `nl2br`: insert `<br />` before every line break
pub fn nl2br(_ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    let line_break = LINE_BREAK
        .get_or_init(|| Regex::new(r"\r\n|\n\r|\n|\r").expect("line break pattern is valid"));
    Value::String(line_break.replace_all(&value.coerce_string(), "<br />$0").into_owned())
}

/// `striptags(allowed?)`: remove markup tags, keeping any listed as `<b><i>`
pub fn striptags(_ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let tag = TAG.get_or_init(|| {
        Regex::new(r"(?s)<\s*/?\s*([a-zA-Z][a-zA-Z0-9]*)?[^>]*>").expect("tag pattern is valid")
    });
    let allowed_tag = ALLOWED_TAG
        .get_or_init(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)>").expect("allowed tag pattern is valid"));

    let allowed: HashSet<String> = args
        .first()
        .map(Value::coerce_string)
        .map(|list| {
            allowed_tag
                .captures_iter(&list)
                .map(|caps| caps[1].to_ascii_lowercase())
                .collect()
        })
        .unwrap_or_default();

    let text = value.coerce_string();
    let stripped = tag.replace_all(&text, |caps: &Captures| match caps.get(1) {
        Some(name) if allowed.contains(&name.as_str().to_ascii_lowercase()) => caps[0].to_string(),
        _ => String::new(),
    });
    Value::String(stripped.into_owned())
}

/// `replace(pairs)`: replace every key of a mapping with its value.
///
/// Replacement is simultaneous: at each position the longest matching key
/// wins and replaced text is never rescanned.
pub fn replace(_ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let text = value.coerce_string();
    let Some(pairs) = args.first().and_then(Value::as_mapping) else {
        return Value::String(text);
    };

    let mut needles: Vec<&str> = pairs
        .keys()
        .map(String::as_str)
        .filter(|key| !key.is_empty())
        .collect();
    if needles.is_empty() {
        return Value::String(text);
    }
    needles.sort_by(|a, b| b.len().cmp(&a.len()));

    let alternation = needles
        .iter()
        .map(|needle| regex::escape(needle))
        .collect::<Vec<_>>()
        .join("|");
    let Ok(matcher) = Regex::new(&alternation) else {
        return Value::String(text);
    };

    let replaced = matcher.replace_all(&text, |caps: &Captures| {
        pairs
            .get(&caps[0])
            .map(Value::coerce_string)
            .unwrap_or_default()
    });
    Value::String(replaced.into_owned())
}

/// `split(delimiter, limit?)`
///
/// An empty delimiter cuts the string into chunks of `limit` characters. A
/// positive limit caps the number of pieces, a negative one drops that many
/// pieces from the end.
pub fn split(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let Some(delimiter) = args.first().filter(|d| !d.is_null()).map(Value::coerce_string) else {
        return ctx.degrade("split", "missing delimiter");
    };
    let limit = args
        .get(1)
        .filter(|limit| !limit.is_null())
        .map(|limit| limit.coerce_number().trunc() as i64);
    let text = value.coerce_string();

    if delimiter.is_empty() {
        let width = limit.filter(|l| *l > 0).unwrap_or(1) as usize;
        let chars: Vec<char> = text.chars().collect();
        return chars
            .chunks(width)
            .map(|chunk| chunk.iter().collect::<String>())
            .collect();
    }

    match limit {
        Some(l) if l > 0 => text.splitn(l as usize, delimiter.as_str()).collect(),
        Some(0) => text.splitn(1, delimiter.as_str()).collect(),
        Some(l) => {
            let pieces: Vec<&str> = text.split(delimiter.as_str()).collect();
            let keep = pieces.len().saturating_sub(l.unsigned_abs() as usize);
            pieces[..keep].iter().copied().collect()
        }
        None => text.split(delimiter.as_str()).collect(),
    }
}

/// `format(args...)`: printf-style formatting with `%s`, `%d`, `%f`, `%.Nf`
/// and `%%`. Missing arguments render empty.
pub fn format(_ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let spec = FORMAT_SPEC
        .get_or_init(|| Regex::new(r"%(?:\.(\d+))?([%sdf])").expect("format pattern is valid"));

    let mut remaining = args.iter();
    let template = value.coerce_string();
    let formatted = spec.replace_all(&template, |caps: &Captures| {
        if &caps[2] == "%" {
            return "%".to_string();
        }
        let Some(arg) = remaining.next() else {
            return String::new();
        };
        match &caps[2] {
            "d" => format!("{}", arg.coerce_number().trunc() as i64),
            "f" => {
                let precision = caps.get(1).map_or(6, |p| {
                    p.as_str()
                        .parse::<usize>()
                        .map_or(MAX_FORMAT_PRECISION, |p| p.min(MAX_FORMAT_PRECISION))
                });
                format!("{:.*}", precision, arg.coerce_number())
            }
            _ => arg.coerce_string(),
        }
    });
    Value::String(formatted.into_owned())
}

/// `raw`: marks output as safe for the host; the value itself is unchanged
pub fn raw(_ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    value.clone()
}

/// `convert_encoding(to, from?)`: strings are always UTF-8, so only
/// UTF-8 targets can be honored
pub fn convert_encoding(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let target = args
        .first()
        .map(Value::coerce_string)
        .unwrap_or_default()
        .to_ascii_lowercase();
    match target.as_str() {
        "utf-8" | "utf8" => Value::String(value.coerce_string()),
        _ => ctx.degrade("convert_encoding", "only UTF-8 targets are supported"),
    }
}

/// `default(fallback)`: the fallback when the subject is empty
pub fn default(_ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let empty = match value {
        Value::Null => true,
        Value::Number(_) => false,
        Value::String(s) => s.is_empty(),
        Value::Sequence(items) => items.is_empty(),
        Value::Mapping(map) => map.is_empty(),
    };

    if empty {
        args.first().cloned().unwrap_or_default()
    } else {
        value.clone()
    }
}

/// `json_encode`: JSON text of the subject
pub fn json_encode(ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    match serde_json::to_string(value) {
        Ok(json) => Value::String(json),
        Err(_) => ctx.degrade("json_encode", "value cannot be serialized"),
    }
}
