//! Numeric filters

use crate::context::Context;
use crate::value::Value;

/// Precision range accepted by `round`
const MAX_PRECISION: f64 = 15.0;

/// Decimal places accepted by `number_format`
const MAX_DECIMALS: f64 = 20.0;

/// `abs`: absolute value of the subject coerced to a number
pub fn abs(_ctx: &Context, value: &Value, _args: &[Value]) -> Value {
    Value::Number(value.coerce_number().abs())
}

/// `round(precision = 0, method = "common")`
///
/// `common` rounds half away from zero; `ceil` and `floor` round towards
/// positive and negative infinity.
pub fn round(ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let number = value.coerce_number();
    let precision = args
        .first()
        .map(Value::coerce_number)
        .unwrap_or(0.0)
        .trunc()
        .clamp(-MAX_PRECISION, MAX_PRECISION) as i32;
    let method = args
        .get(1)
        .map(Value::coerce_string)
        .unwrap_or_else(|| "common".to_string());

    // scale by an exact power of ten in both directions
    let factor = 10f64.powi(precision.abs());
    let scaled = if precision < 0 { number / factor } else { number * factor };
    let rounded = match method.as_str() {
        "common" => scaled.round(),
        "ceil" => scaled.ceil(),
        "floor" => scaled.floor(),
        _ => return ctx.degrade("round", "unknown rounding method"),
    };

    // too large to carry fractional digits at this precision
    if !scaled.is_finite() {
        return Value::Number(number);
    }

    Value::Number(if precision < 0 { rounded * factor } else { rounded / factor })
}

/// Insert `separator` between every group of three digits
fn group_thousands(digits: &str, separator: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// `number_format(decimals = 0, dec_point = ".", thousands_sep = ",")`
pub fn number_format(_ctx: &Context, value: &Value, args: &[Value]) -> Value {
    let number = value.coerce_number();
    if !number.is_finite() {
        return Value::String(value.coerce_string());
    }

    let decimals = args
        .first()
        .map(Value::coerce_number)
        .unwrap_or(0.0)
        .trunc()
        .clamp(0.0, MAX_DECIMALS) as usize;
    let dec_point = args.get(1).map(Value::coerce_string).unwrap_or_else(|| ".".to_string());
    let thousands = args.get(2).map(Value::coerce_string).unwrap_or_else(|| ",".to_string());

    // half away from zero, before the fixed-point rendering gets a say
    let factor = 10f64.powi(decimals as i32);
    let scaled = number.abs() * factor;
    let magnitude = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        number.abs()
    };
    let fixed = format!("{:.*}", decimals, magnitude);

    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut formatted = String::new();
    if number < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        formatted.push('-');
    }
    formatted.push_str(&group_thousands(int_part, &thousands));
    if !frac_part.is_empty() {
        formatted.push_str(&dec_point);
        formatted.push_str(frac_part);
    }

    Value::String(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::new()
    }

    #[test]
    fn test_abs() {
        assert_eq!(abs(&ctx(), &Value::from(-4.5), &[]), Value::from(4.5));
        assert_eq!(abs(&ctx(), &Value::from("-3"), &[]), Value::from(3));
        assert_eq!(abs(&ctx(), &Value::Null, &[]), Value::from(0));
    }

    #[test]
    fn test_round() {
        assert_eq!(round(&ctx(), &Value::from(2.5), &[]), Value::from(3));
        assert_eq!(round(&ctx(), &Value::from(-2.5), &[]), Value::from(-3));
        assert_eq!(round(&ctx(), &Value::from(3.14159), &[Value::from(2)]), Value::from(3.14));
        assert_eq!(
            round(&ctx(), &Value::from(3.141), &[Value::from(1), Value::from("ceil")]),
            Value::from(3.2)
        );
        assert_eq!(
            round(&ctx(), &Value::from(3.19), &[Value::from(1), Value::from("floor")]),
            Value::from(3.1)
        );
        assert_eq!(round(&ctx(), &Value::from(1250), &[Value::from(-2)]), Value::from(1300));
        assert!(round(&ctx(), &Value::from(1), &[Value::from(0), Value::from("bankers")]).is_null());
    }

    #[test]
    fn test_round_keeps_huge_numbers() {
        assert_eq!(round(&ctx(), &Value::from(1e300), &[Value::from(15)]), Value::from(1e300));
        assert_eq!(
            round(&ctx(), &Value::from(-1e300), &[Value::from(15), Value::from("ceil")]),
            Value::from(-1e300)
        );
        assert_eq!(round(&ctx(), &Value::from(f64::MAX), &[Value::from(1)]), Value::from(f64::MAX));
    }

    #[test]
    fn test_number_format() {
        assert_eq!(number_format(&ctx(), &Value::from(1234567.891), &[]), Value::from("1,234,568"));
        assert_eq!(
            number_format(&ctx(), &Value::from(1234567.891), &[Value::from(2)]),
            Value::from("1,234,567.89")
        );
        assert_eq!(
            number_format(
                &ctx(),
                &Value::from(1234567.891),
                &[Value::from(2), Value::from(","), Value::from(".")]
            ),
            Value::from("1.234.567,89")
        );
        assert_eq!(number_format(&ctx(), &Value::from(2.5), &[]), Value::from("3"));
        assert_eq!(number_format(&ctx(), &Value::from(-1000), &[]), Value::from("-1,000"));
        assert_eq!(number_format(&ctx(), &Value::from(-0.4), &[]), Value::from("0"));
        assert_eq!(number_format(&ctx(), &Value::from(999), &[]), Value::from("999"));
        assert_eq!(
            number_format(&ctx(), &Value::from(1000), &[Value::from(0), Value::from("."), Value::from("")]),
            Value::from("1000")
        );
    }

    #[test]
    fn test_number_format_keeps_huge_numbers() {
        let expected = format!("{:.20}", 1e300);
        let (int_part, frac_part) = expected.split_once('.').unwrap();
        let expected = format!("{}.{}", group_thousands(int_part, ","), frac_part);

        let result = number_format(&ctx(), &Value::from(1e300), &[Value::from(20)]);
        assert_eq!(result, Value::String(expected.clone()));
        assert!(!expected.contains("inf"));

        let negative = number_format(&ctx(), &Value::from(-1e300), &[Value::from(20)]);
        assert_eq!(negative, Value::String(format!("-{}", expected)));
    }
}
