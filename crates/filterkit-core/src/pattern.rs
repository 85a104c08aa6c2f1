//! Date pattern translation
//!
//! Templates describe date layouts with human-friendly tokens such as `yyyy`,
//! `MM` or `hh`. This module rewrites such a pattern into the strftime dialect
//! understood by `chrono`.
//!
//! The token table is an ordered slice. Within each calendar field the longer
//! tokens come first, so `yyyy` is consumed as one token before `yyy` or `yy`
//! get a chance to match part of it. Translation is a single left-to-right
//! pass: at every position the table is tried in order and the first token
//! that matches is emitted; anything else is copied through as literal text.
//! Emitted specifiers are never rescanned, so the letters inside `%m` or `%d`
//! cannot be picked up again by the `m` or `d` tokens.
//!
//! Copyright (c) 2025 Filterkit Team
//! Licensed under the Apache-2.0 license

use chrono::NaiveDateTime;
use std::fmt::Write;

/// Default pattern of the `date` filter
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd";

/// Default pattern of the `dateTime` filter
pub const DEFAULT_DATE_TIME_PATTERN: &str = "yyyy-MM-dd hh:mm:ss";

/// Default pattern of the `time` filter
pub const DEFAULT_TIME_PATTERN: &str = "hh:mm:ss";

/// A single pattern token and the strftime specifier it becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternToken {
    /// Token as written in a template pattern
    pub custom: &'static str,
    /// Equivalent strftime specifier
    pub target: &'static str,
}

const fn token(custom: &'static str, target: &'static str) -> PatternToken {
    PatternToken { custom, target }
}

/// Token table, longest token first within each field
pub const TOKENS: &[PatternToken] = &[
    // year
    token("yyyy", "%Y"),
    token("yyy", "0%y"),
    token("yy", "%y"),
    // month
    token("MM", "%m"), // 01-12
    token("M", "%-m"), // 1-12
    // day
    token("dd", "%d"), // 01-31
    token("d", "%-d"), // 1-31
    // hour, 12-hour clock
    token("hh", "%I"), // 01-12
    token("h", "%-I"), // 1-12
    // hour, 24-hour clock
    token("HH", "%H"), // 00-23
    token("H", "%H"),  // single H is still zero-padded
    // minute
    token("mm", "%M"), // 00-59
    token("m", "%-M"), // 0-59
    // second
    token("ss", "%S"), // 00-59
    token("s", "%-S"), // 0-59
];

/// Translate a template date pattern into a strftime format string.
///
/// Unrecognized text passes through unchanged, except `%`, which is escaped
/// as `%%` so it always renders literally. Never fails.
///
/// ```
/// use filterkit_core::pattern::translate;
///
/// assert_eq!(translate("yyyy/MM/dd"), "%Y/%m/%d");
/// assert_eq!(translate("hh:mm a"), "%I:%M a");
/// ```
pub fn translate(pattern: &str) -> String {
    let mut translated = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(tok) = TOKENS.iter().find(|tok| rest.starts_with(tok.custom)) {
            translated.push_str(tok.target);
            rest = &rest[tok.custom.len()..];
            continue;
        }

        let mut chars = rest.chars();
        match chars.next() {
            Some('%') => translated.push_str("%%"),
            Some(c) => translated.push(c),
            None => break,
        }
        rest = chars.as_str();
    }

    translated
}

/// Render `instant` with an already translated strftime format.
///
/// Returns `None` if the format contains a specifier chrono rejects.
pub fn format_translated(instant: &NaiveDateTime, format: &str) -> Option<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", instant.format(format)).ok()?;
    Some(rendered)
}
