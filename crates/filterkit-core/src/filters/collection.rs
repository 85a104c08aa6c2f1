//! Filters over sequences, mappings and other enumerable subjects
//!
//! Mapping subjects are always enumerated in ascending key order. Filters that
//! produce a new collection (`merge`, `reverse`, `slice`, `sort`) return a
//! sequence and drop the original keys.

use crate::context::Context;
use crate::value::Value;
use std::cmp::Ordering;

/// `get(key)`: 1-based index into a sequence or key lookup in a mapping
pub fn get(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let [key] = args else {
        return ctx.degrade("get", "expects exactly one argument");
    };

    match (value, key) {
        (Value::Sequence(items), Value::Number(index)) => {
            let index = index.trunc();
            if !(1.0..=items.len() as f64).contains(&index) {
                return ctx.degrade("get", "index out of range");
            }
            items[index as usize - 1].clone()
        }
        (Value::Mapping(map), Value::String(name)) if !name.is_empty() => match map.get(name) {
            Some(found) => found.clone(),
            None => ctx.degrade("get", "key not found"),
        },
        _ => ctx.degrade("get", "unsupported subject or key"),
    }
}

/// `merge(other)`: subject elements followed by the argument's elements.
///
/// A non-iterable argument contributes nothing.
pub fn merge(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let [other] = args else {
        return ctx.degrade("merge", "expects exactly one argument");
    };
    if !value.is_iterable() {
        return ctx.degrade("merge", "subject is not iterable");
    }

    value.iter().chain(other.iter()).cloned().collect()
}

/// `first`: first element, or first character of a scalar
pub fn first(ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    let found = match value {
        Value::Sequence(_) | Value::Mapping(_) => value.iter().next().cloned(),
        Value::String(_) | Value::Number(_) => value
            .coerce_string()
            .chars()
            .next()
            .map(|c| Value::String(c.to_string())),
        Value::Null => None,
    };
    found.unwrap_or_else(|| ctx.degrade("first", "nothing to take"))
}

/// `last`: last element, or last character of a scalar
pub fn last(ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    let found = match value {
        Value::Sequence(_) | Value::Mapping(_) => value.iter().next_back().cloned(),
        Value::String(_) | Value::Number(_) => value
            .coerce_string()
            .chars()
            .next_back()
            .map(|c| Value::String(c.to_string())),
        Value::Null => None,
    };
    found.unwrap_or_else(|| ctx.degrade("last", "nothing to take"))
}

/// `keys`: mapping keys, or the zero-based indices of a sequence
pub fn keys(ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    match value {
        Value::Mapping(map) => map.keys().map(String::as_str).collect(),
        Value::Sequence(items) => (0..items.len()).collect(),
        _ => ctx.degrade("keys", "subject has no keys"),
    }
}

/// `length`: characters of a string, elements of a collection, else 0
pub fn length(_ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    let count = match value {
        Value::String(s) => s.chars().count(),
        _ => value.len().unwrap_or(0),
    };
    Value::from(count)
}

/// `join(glue = "", and?)`: concatenate elements as strings
pub fn join(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    if !value.is_iterable() {
        return ctx.degrade("join", "subject is not iterable");
    }

    let glue = args.first().map(Value::coerce_string).unwrap_or_default();
    let last_glue = args
        .get(1)
        .filter(|and| !and.is_null())
        .map(Value::coerce_string)
        .unwrap_or_else(|| glue.clone());

    let parts: Vec<String> = value.iter().map(Value::coerce_string).collect();
    let joined = match parts.split_last() {
        Some((tail, init)) if !init.is_empty() => {
            format!("{}{}{}", init.join(&glue), last_glue, tail)
        }
        _ => parts.concat(),
    };
    Value::String(joined)
}

/// `reverse`: reversed elements, or reversed characters of a scalar
pub fn reverse(ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    match value {
        Value::Sequence(_) | Value::Mapping(_) => value.iter().rev().cloned().collect(),
        Value::String(_) | Value::Number(_) => {
            Value::String(value.coerce_string().chars().rev().collect())
        }
        Value::Null => ctx.degrade("reverse", "nothing to reverse"),
    }
}

/// Resolve `start`/`length` arguments into a half-open range over `len` items
fn slice_range(len: usize, start: f64, length: Option<f64>) -> (usize, usize) {
    let len = len as i64;
    let start = start.trunc() as i64;
    let start = if start < 0 {
        len.saturating_add(start).max(0)
    } else {
        start.min(len)
    };

    let end = match length.map(|l| l.trunc() as i64) {
        None => len,
        Some(l) if l < 0 => len.saturating_add(l).max(start),
        Some(l) => start.saturating_add(l).min(len),
    };

    (start as usize, end as usize)
}

/// `slice(start, length?)`: a sub-range of elements or characters.
///
/// A negative start counts from the end; a negative length stops that many
/// elements before the end.
pub fn slice(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let start = args.first().map(Value::coerce_number).unwrap_or(0.0);
    let length = args
        .get(1)
        .filter(|length| !length.is_null())
        .map(Value::coerce_number);

    match value {
        Value::Sequence(_) | Value::Mapping(_) => {
            let items: Vec<&Value> = value.iter().collect();
            let (from, to) = slice_range(items.len(), start, length);
            items[from..to].iter().map(|item| (*item).clone()).collect()
        }
        Value::String(_) | Value::Number(_) => {
            let chars: Vec<char> = value.coerce_string().chars().collect();
            let (from, to) = slice_range(chars.len(), start, length);
            Value::String(chars[from..to].iter().collect())
        }
        Value::Null => ctx.degrade("slice", "nothing to slice"),
    }
}

fn shape_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Sequence(_) => 3,
        Value::Mapping(_) => 4,
    }
}

/// Total order used by `sort`: null, numbers, strings, then collections
pub fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => shape_rank(a).cmp(&shape_rank(b)),
    }
}

/// `sort`: elements in ascending order
pub fn sort(ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    if !value.is_iterable() {
        return ctx.degrade("sort", "subject is not iterable");
    }

    let mut items: Vec<Value> = value.iter().cloned().collect();
    items.sort_by(compare);
    Value::Sequence(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn ctx() -> Context {
        Context::new()
    }

    #[test]
    fn test_get_is_one_based() {
        let seq = v(json!(["a", "b", "c"]));
        assert_eq!(get(&ctx(), &seq, &[Value::from(1)]), Value::from("a"));
        assert_eq!(get(&ctx(), &seq, &[Value::from(3)]), Value::from("c"));
        assert!(get(&ctx(), &seq, &[Value::from(0)]).is_null());
        assert!(get(&ctx(), &seq, &[Value::from(4)]).is_null());
        assert!(get(&ctx(), &seq, &[Value::from(-1)]).is_null());
        assert!(get(&ctx(), &seq, &[Value::Number(f64::NAN)]).is_null());
    }

    #[test]
    fn test_get_truncates_fractional_index() {
        let seq = v(json!(["a", "b", "c"]));
        assert_eq!(get(&ctx(), &seq, &[Value::from(2.7)]), Value::from("b"));
    }

    #[test]
    fn test_get_mapping() {
        let map = v(json!({"x": 1}));
        assert_eq!(get(&ctx(), &map, &[Value::from("x")]), Value::from(1));
        assert!(get(&ctx(), &map, &[Value::from("y")]).is_null());
        assert!(get(&ctx(), &map, &[Value::from("")]).is_null());
        assert!(get(&ctx(), &map, &[Value::from(1)]).is_null());
    }

    #[test]
    fn test_get_rejects_other_shapes_and_arity() {
        let seq = v(json!(["a"]));
        assert!(get(&ctx(), &seq, &[Value::from("1")]).is_null());
        assert!(get(&ctx(), &seq, &[]).is_null());
        assert!(get(&ctx(), &seq, &[Value::from(1), Value::from(1)]).is_null());
        assert!(get(&ctx(), &Value::from("abc"), &[Value::from(1)]).is_null());
        assert!(get(&ctx(), &Value::Null, &[Value::from("x")]).is_null());
    }

    #[test]
    fn test_merge_preserves_order() {
        let result = merge(&ctx(), &v(json!([1, 2])), &[v(json!([3, 4]))]);
        assert_eq!(result, v(json!([1, 2, 3, 4])));
    }

    #[test]
    fn test_merge_discards_keys() {
        let result = merge(&ctx(), &v(json!({"b": 2, "a": 1})), &[v(json!({"c": 3}))]);
        assert_eq!(result, v(json!([1, 2, 3])));
    }

    #[test]
    fn test_merge_violations() {
        assert!(merge(&ctx(), &Value::from("x"), &[v(json!([1]))]).is_null());
        assert!(merge(&ctx(), &v(json!([1])), &[]).is_null());
        assert!(merge(&ctx(), &v(json!([1])), &[v(json!([2])), v(json!([3]))]).is_null());
        assert_eq!(merge(&ctx(), &v(json!([1])), &[Value::from(5)]), v(json!([1])));
        assert_eq!(merge(&ctx(), &v(json!([])), &[v(json!([]))]), v(json!([])));
    }

    #[test]
    fn test_first_and_last() {
        let seq = v(json!([1, 2, 3]));
        assert_eq!(first(&ctx(), &seq, &[]), Value::from(1));
        assert_eq!(last(&ctx(), &seq, &[]), Value::from(3));
        assert_eq!(first(&ctx(), &Value::from("héllo"), &[]), Value::from("h"));
        assert_eq!(last(&ctx(), &Value::from("héllo"), &[]), Value::from("o"));
        assert_eq!(first(&ctx(), &v(json!({"b": 2, "a": 1})), &[]), Value::from(1));
        assert!(first(&ctx(), &v(json!([])), &[]).is_null());
        assert!(last(&ctx(), &Value::from(""), &[]).is_null());
        assert!(first(&ctx(), &Value::Null, &[]).is_null());
    }

    #[test]
    fn test_keys() {
        assert_eq!(keys(&ctx(), &v(json!({"b": 1, "a": 2})), &[]), v(json!(["a", "b"])));
        assert_eq!(keys(&ctx(), &v(json!(["x", "y"])), &[]), v(json!([0, 1])));
        assert!(keys(&ctx(), &Value::from("x"), &[]).is_null());
    }

    #[test]
    fn test_length() {
        assert_eq!(length(&ctx(), &Value::from("héllo"), &[]), Value::from(5));
        assert_eq!(length(&ctx(), &v(json!([1, 2])), &[]), Value::from(2));
        assert_eq!(length(&ctx(), &v(json!({"a": 1})), &[]), Value::from(1));
        assert_eq!(length(&ctx(), &Value::Null, &[]), Value::from(0));
        assert_eq!(length(&ctx(), &Value::from(123), &[]), Value::from(0));
    }

    #[test]
    fn test_join() {
        let seq = v(json!(["a", 1, 2.5]));
        assert_eq!(join(&ctx(), &seq, &[]), Value::from("a12.5"));
        assert_eq!(join(&ctx(), &seq, &[Value::from(", ")]), Value::from("a, 1, 2.5"));
        assert_eq!(
            join(&ctx(), &seq, &[Value::from(", "), Value::from(" and ")]),
            Value::from("a, 1 and 2.5")
        );
        assert_eq!(join(&ctx(), &v(json!(["solo"])), &[Value::from(", ")]), Value::from("solo"));
        assert_eq!(join(&ctx(), &v(json!([])), &[Value::from(", ")]), Value::from(""));
        assert!(join(&ctx(), &Value::from("abc"), &[]).is_null());
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse(&ctx(), &v(json!([1, 2, 3])), &[]), v(json!([3, 2, 1])));
        assert_eq!(reverse(&ctx(), &v(json!({"a": 1, "b": 2})), &[]), v(json!([2, 1])));
        assert_eq!(reverse(&ctx(), &Value::from("abc"), &[]), Value::from("cba"));
        assert_eq!(reverse(&ctx(), &Value::from(120), &[]), Value::from("021"));
        assert!(reverse(&ctx(), &Value::Null, &[]).is_null());
    }

    #[test]
    fn test_slice() {
        let seq = v(json!([1, 2, 3, 4, 5]));
        assert_eq!(slice(&ctx(), &seq, &[Value::from(1), Value::from(2)]), v(json!([2, 3])));
        assert_eq!(slice(&ctx(), &seq, &[Value::from(3)]), v(json!([4, 5])));
        assert_eq!(slice(&ctx(), &seq, &[Value::from(-2)]), v(json!([4, 5])));
        assert_eq!(slice(&ctx(), &seq, &[Value::from(1), Value::from(-1)]), v(json!([2, 3, 4])));
        assert_eq!(slice(&ctx(), &seq, &[Value::from(10)]), v(json!([])));
        assert_eq!(slice(&ctx(), &seq, &[Value::from(-10), Value::from(2)]), v(json!([1, 2])));
        assert_eq!(slice(&ctx(), &seq, &[Value::from(3), Value::from(-4)]), v(json!([])));
        assert_eq!(
            slice(&ctx(), &Value::from("héllo"), &[Value::from(1), Value::from(3)]),
            Value::from("éll")
        );
        assert!(slice(&ctx(), &Value::Null, &[Value::from(1)]).is_null());
    }

    #[test]
    fn test_sort() {
        assert_eq!(sort(&ctx(), &v(json!([3, 1, 2])), &[]), v(json!([1, 2, 3])));
        assert_eq!(
            sort(&ctx(), &v(json!(["pear", 10, "apple", null, 2])), &[]),
            v(json!([null, 2, 10, "apple", "pear"]))
        );
        assert_eq!(sort(&ctx(), &v(json!({"a": "z", "b": "m"})), &[]), v(json!(["m", "z"])));
        assert!(sort(&ctx(), &Value::from("cba"), &[]).is_null());
    }
}
