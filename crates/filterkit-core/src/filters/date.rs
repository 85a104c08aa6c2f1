//! Date, time and date-time filters
//!
//! Subjects arrive in one of three fixed textual representations and are
//! parsed strictly; anything else degrades to `Null`. Output is rendered with
//! a translated template pattern and prefixed with a newline and a space.
//!
//! Copyright (c) 2025 Filterkit Team
//! Licensed under the Apache-2.0 license

use crate::context::Context;
use crate::pattern::{
    self, DEFAULT_DATE_PATTERN, DEFAULT_DATE_TIME_PATTERN, DEFAULT_TIME_PATTERN,
};
use crate::value::Value;
use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use regex::Regex;
use std::sync::OnceLock;

/// Prefix written before every rendered date
pub const OUTPUT_PREFIX: &str = "\n ";

static DATE_SHAPE: OnceLock<Regex> = OnceLock::new();
static TIME_SHAPE: OnceLock<Regex> = OnceLock::new();
static DATE_TIME_SHAPE: OnceLock<Regex> = OnceLock::new();
static MODIFIER_TERM: OnceLock<Regex> = OnceLock::new();

/// Which fixed representation a filter consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM:SS`, 24-hour clock
    Time,
    /// `YYYY-MM-DD HH:MM:SS`
    DateTime,
}

impl DateKind {
    /// Registered filter name
    pub fn filter_name(self) -> &'static str {
        match self {
            DateKind::Date => "date",
            DateKind::Time => "time",
            DateKind::DateTime => "dateTime",
        }
    }

    /// Template pattern used when the caller supplies none
    pub fn default_pattern(self) -> &'static str {
        match self {
            DateKind::Date => DEFAULT_DATE_PATTERN,
            DateKind::Time => DEFAULT_TIME_PATTERN,
            DateKind::DateTime => DEFAULT_DATE_TIME_PATTERN,
        }
    }

    /// strftime format of the fixed representation
    pub fn representation(self) -> &'static str {
        match self {
            DateKind::Date => "%Y-%m-%d",
            DateKind::Time => "%H:%M:%S",
            DateKind::DateTime => "%Y-%m-%d %H:%M:%S",
        }
    }

    /// Format used without a pattern argument.
    ///
    /// The default pattern is translated as usual, but its hours are read on
    /// the 24-hour clock of the fixed representation so the output parses
    /// back to the same instant.
    pub fn default_format(self) -> String {
        pattern::translate(self.default_pattern()).replace("%I", "%H")
    }

    fn shape(self) -> &'static Regex {
        let (cell, source) = match self {
            DateKind::Date => (&DATE_SHAPE, r"^\d{4}-\d{2}-\d{2}$"),
            DateKind::Time => (&TIME_SHAPE, r"^\d{2}:\d{2}:\d{2}$"),
            DateKind::DateTime => (&DATE_TIME_SHAPE, r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$"),
        };
        cell.get_or_init(|| Regex::new(source).expect("date shape pattern is valid"))
    }

    /// Parse `input` strictly against this representation.
    ///
    /// Time-only values land on 0000-01-01.
    pub fn parse(self, input: &str) -> Option<NaiveDateTime> {
        if !self.shape().is_match(input) {
            return None;
        }

        match self {
            DateKind::Date => {
                let date = NaiveDate::parse_from_str(input, self.representation()).ok()?;
                Some(date.and_time(midnight()?))
            }
            DateKind::Time => {
                let time = NaiveTime::parse_from_str(input, self.representation()).ok()?;
                Some(NaiveDate::from_ymd_opt(0, 1, 1)?.and_time(time))
            }
            DateKind::DateTime => NaiveDateTime::parse_from_str(input, self.representation()).ok(),
        }
    }
}

fn midnight() -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(0, 0, 0)
}

fn render(kind: DateKind, ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let input = value.coerce_string();
    let Some(instant) = kind.parse(&input) else {
        return ctx.degrade(kind.filter_name(), "value does not match the expected representation");
    };

    let format = match args.first() {
        Some(requested) if !requested.is_null() => pattern::translate(&requested.coerce_string()),
        _ => kind.default_format(),
    };

    match pattern::format_translated(&instant, &format) {
        Some(text) => Value::String(format!("{OUTPUT_PREFIX}{text}")),
        None => ctx.degrade(kind.filter_name(), "pattern cannot be rendered"),
    }
}

/// `date(pattern?)`: render a `YYYY-MM-DD` subject
pub fn date(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    render(DateKind::Date, ctx, value, args)
}

/// `dateTime(pattern?)`: render a `YYYY-MM-DD HH:MM:SS` subject
pub fn date_time(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    render(DateKind::DateTime, ctx, value, args)
}

/// `time(pattern?)`: render an `HH:MM:SS` subject
pub fn time(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    render(DateKind::Time, ctx, value, args)
}

/// `date_modify(modifier)`: shift a date or date-time by relative terms such
/// as `+1 day -2 hours`, producing a `YYYY-MM-DD HH:MM:SS` string.
pub fn date_modify(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let input = value.coerce_string();
    let Some(instant) = DateKind::DateTime
        .parse(&input)
        .or_else(|| DateKind::Date.parse(&input))
    else {
        return ctx.degrade("date_modify", "value is not a date or date-time");
    };
    let Some(modifier) = args.first().filter(|m| !m.is_null()) else {
        return ctx.degrade("date_modify", "missing modifier");
    };

    apply_modifier(instant, &modifier.coerce_string())
        .and_then(|shifted| {
            pattern::format_translated(&shifted, DateKind::DateTime.representation())
        })
        .map(Value::String)
        .unwrap_or_else(|| ctx.degrade("date_modify", "modifier is invalid or out of range"))
}

/// Apply every `[+-]N unit` term of `modifier` in order
fn apply_modifier(instant: NaiveDateTime, modifier: &str) -> Option<NaiveDateTime> {
    let term = MODIFIER_TERM.get_or_init(|| {
        Regex::new(r"(?i)([+-]?\d+)\s*(second|minute|hour|day|week|month|year)s?\b")
            .expect("modifier pattern is valid")
    });

    let mut shifted = instant;
    let mut consumed = 0;
    let mut terms = 0;

    for caps in term.captures_iter(modifier) {
        let whole = caps.get(0)?;
        if !modifier[consumed..whole.start()].trim().is_empty() {
            return None;
        }
        consumed = whole.end();
        terms += 1;

        let amount: i64 = caps[1].parse().ok()?;
        shifted = match caps[2].to_ascii_lowercase().as_str() {
            "second" => shifted.checked_add_signed(TimeDelta::try_seconds(amount)?)?,
            "minute" => shifted.checked_add_signed(TimeDelta::try_minutes(amount)?)?,
            "hour" => shifted.checked_add_signed(TimeDelta::try_hours(amount)?)?,
            "day" => shifted.checked_add_signed(TimeDelta::try_days(amount)?)?,
            "week" => shifted.checked_add_signed(TimeDelta::try_weeks(amount)?)?,
            "month" => shift_months(shifted, amount)?,
            "year" => shift_months(shifted, amount.checked_mul(12)?)?,
            _ => return None,
        };
    }

    if terms == 0 || !modifier[consumed..].trim().is_empty() {
        return None;
    }
    Some(shifted)
}

fn shift_months(instant: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount < 0 {
        instant.checked_sub_months(months)
    } else {
        instant.checked_add_months(months)
    }
}
