//! Batching of sequences and mappings into fixed-size groups

use crate::context::Context;
use crate::value::Value;

/// Largest group size `batch` accepts, since a fill pads the last group to it
pub const MAX_BATCH_SIZE: usize = 65_536;

/// Split `items` into groups of `size`, in enumeration order.
///
/// Every group but the last holds exactly `size` elements. A trailing partial
/// group is padded with copies of `fill` when one is given and kept short
/// otherwise. A `size` of zero yields no groups. Padding allocates `size`
/// elements, so callers bound it (see [`MAX_BATCH_SIZE`]).
pub fn chunk<'a, I>(items: I, size: usize, fill: Option<&Value>) -> Vec<Vec<Value>>
where
    I: IntoIterator<Item = &'a Value>,
{
    if size == 0 {
        return Vec::new();
    }

    let mut groups = Vec::new();
    let mut current = Vec::new();

    for item in items {
        current.push(item.clone());
        if current.len() == size {
            groups.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        if let Some(fill) = fill {
            current.resize(size, fill.clone());
        }
        groups.push(current);
    }

    groups
}

/// `batch(size = 1, fill?)`: group an iterable subject.
///
/// Sizes are truncated to whole numbers; anything below 2 or above
/// [`MAX_BATCH_SIZE`] is rejected. A `Null` fill is treated as no fill.
/// Mappings are batched by value in key order.
pub fn batch(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let size = args.first().map(Value::coerce_number).unwrap_or(1.0).trunc();
    let fill = args.get(1).filter(|fill| !fill.is_null());

    if !value.is_iterable() {
        return ctx.degrade("batch", "subject is not iterable");
    }
    // also rejects NaN
    if !(size >= 2.0) {
        return ctx.degrade("batch", "batch size must be greater than one");
    }
    if size > MAX_BATCH_SIZE as f64 {
        return ctx.degrade("batch", "batch size is too large");
    }

    chunk(value, size as usize, fill)
        .into_iter()
        .map(Value::Sequence)
        .collect()
}
