//! Built-in filter implementations
//!
//! Every filter has the same shape, `fn(&Context, &Value, &[Value]) -> Value`,
//! and never fails: input it cannot handle produces [`Value::Null`].
//!
//! # Module Organization
//!
//! - [`date`] - `date`, `dateTime`, `time` and `date_modify`
//! - [`batch`] - the batching engine behind `batch`
//! - [`collection`] - `get`, `merge` and the other sequence/mapping filters
//! - [`string`] - string filters plus `default`, `raw` and `json_encode`
//! - [`number`] - `abs`, `round` and `number_format`
//!
//! # Examples
//!
//! ```
//! use filterkit_core::{Context, Value};
//! use filterkit_core::filters::{batch, collection};
//! use serde_json::json;
//!
//! let ctx = Context::new();
//! let items = Value::from(json!([1, 2, 3, 4, 5]));
//!
//! let groups = batch::batch(&ctx, &items, &[Value::from(2), Value::from(0)]);
//! assert_eq!(groups, Value::from(json!([[1, 2], [3, 4], [5, 0]])));
//!
//! let second = collection::get(&ctx, &items, &[Value::from(2)]);
//! assert_eq!(second, Value::from(2));
//! ```

pub mod batch;
pub mod collection;
pub mod date;
pub mod number;
pub mod string;

use crate::registry::FilterFn;

/// Name and implementation of every built-in filter
pub const BUILTIN_FILTERS: &[(&str, FilterFn)] = &[
    ("abs", number::abs),
    ("default", string::default),
    ("batch", batch::batch),
    ("capitalize", string::capitalize),
    ("convert_encoding", string::convert_encoding),
    ("date", date::date),
    ("date_modify", date::date_modify),
    ("first", collection::first),
    ("format", string::format),
    ("join", collection::join),
    ("json_encode", string::json_encode),
    ("keys", collection::keys),
    ("last", collection::last),
    ("length", collection::length),
    ("lower", string::lower),
    ("merge", collection::merge),
    ("nl2br", string::nl2br),
    ("number_format", number::number_format),
    ("raw", string::raw),
    ("replace", string::replace),
    ("reverse", collection::reverse),
    ("round", number::round),
    ("slice", collection::slice),
    ("sort", collection::sort),
    ("split", string::split),
    ("striptags", string::striptags),
    ("title", string::title),
    ("trim", string::trim),
    ("upper", string::upper),
    ("url_encode", string::url_encode),
    // custom
    ("get", collection::get),
    ("dateTime", date::date_time),
    ("time", date::time),
];
