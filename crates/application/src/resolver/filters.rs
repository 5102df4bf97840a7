//! Scalar validation filters
//!
//! Strict text-to-scalar coercions used by `bool`, `not`, `int` and `float`.
//! Input is trimmed of ASCII whitespace before validation.

use envres_domain::Value;

fn trimmed(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0' || c == '\x0B')
}

/// Validates a boolean literal: `1`, `true`, `on`, `yes` and `0`, `false`,
/// `off`, `no`, empty (case-insensitive).
#[must_use]
pub fn filter_bool(text: &str) -> Option<bool> {
    match trimmed(text).to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Validates a decimal integer with optional sign and no leading zeros.
#[must_use]
pub fn filter_int(text: &str) -> Option<i64> {
    let text = trimmed(text);
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }

    text.parse().ok()
}

/// Validates a finite decimal number with optional fraction and exponent.
#[must_use]
pub fn filter_float(text: &str) -> Option<f64> {
    let text = trimmed(text);
    let allowed = |b: u8| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E');

    if !text.bytes().any(|b| b.is_ascii_digit()) || !text.bytes().all(allowed) {
        return None;
    }

    text.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Truthiness of a value: a true boolean literal, a non-zero integer or a
/// non-zero float. Non-scalars are false.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        other => other.scalar_text().is_some_and(|text| {
            filter_bool(&text) == Some(true)
                || filter_int(&text).is_some_and(|i| i != 0)
                || filter_float(&text).is_some_and(|f| f != 0.0)
        }),
    }
}

/// Integer value: integer filter, else float filter truncated toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        other => {
            let text = other.scalar_text()?;
            filter_int(&text).or_else(|| filter_float(&text).map(|f| f.trunc() as i64))
        }
    }
}

/// Float value through the float filter.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Int(i) => Some(*i as f64),
        other => filter_float(&other.scalar_text()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_bool() {
        assert_eq!(filter_bool("Yes"), Some(true));
        assert_eq!(filter_bool(" on "), Some(true));
        assert_eq!(filter_bool("off"), Some(false));
        assert_eq!(filter_bool(""), Some(false));
        assert_eq!(filter_bool("2"), None);
    }

    #[test]
    fn test_filter_int() {
        assert_eq!(filter_int("42"), Some(42));
        assert_eq!(filter_int("-7"), Some(-7));
        assert_eq!(filter_int("+0"), Some(0));
        assert_eq!(filter_int("007"), None);
        assert_eq!(filter_int("1.0"), None);
        assert_eq!(filter_int("99999999999999999999"), None);
        assert_eq!(filter_int(""), None);
    }

    #[test]
    fn test_filter_float() {
        assert_eq!(filter_float("0.1"), Some(0.1));
        assert_eq!(filter_float("1.000"), Some(1.0));
        assert_eq!(filter_float("1e3"), Some(1000.0));
        assert_eq!(filter_float(".5"), Some(0.5));
        assert_eq!(filter_float("inf"), None);
        assert_eq!(filter_float("NaN"), None);
        assert_eq!(filter_float("e"), None);
        assert_eq!(filter_float("1e999"), None);
        assert_eq!(filter_float("abc"), None);
    }

    #[test]
    fn test_truthy() {
        assert!(truthy(&Value::from("1")));
        assert!(truthy(&Value::from("true")));
        assert!(truthy(&Value::from("1.58")));
        assert!(truthy(&Value::from("-3")));
        assert!(!truthy(&Value::from("0")));
        assert!(!truthy(&Value::from("0.00")));
        assert!(!truthy(&Value::from("maybe")));
        assert!(!truthy(&Value::Null));
        assert!(!truthy(&Value::Sequence(vec![Value::Int(1)])));
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int(&Value::from("1.1")), Some(1));
        assert_eq!(to_int(&Value::from("-1.9")), Some(-1));
        assert_eq!(to_int(&Value::from("0.0")), Some(0));
        assert_eq!(to_int(&Value::from("007")), Some(7));
        assert_eq!(to_int(&Value::Bool(true)), Some(1));
        assert_eq!(to_int(&Value::Bool(false)), None);
        assert_eq!(to_int(&Value::from("x")), None);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(&Value::from("1")), Some(1.0));
        assert_eq!(to_float(&Value::Int(2)), Some(2.0));
        assert_eq!(to_float(&Value::Null), None);
    }
}
