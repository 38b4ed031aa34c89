//! Tolerant numeric coercion of raw JSON fields
//!
//! Payload fields arrive as numbers or as strings holding numbers, sometimes
//! with trailing garbage. They are read the way a browser's `parseFloat` and
//! `parseInt` read them: the longest numeric prefix wins, and anything without
//! one becomes NaN (or `None` for integers). Nothing here ever fails.

use serde_json::Value;

/// Text form of a raw field, as string interpolation in the page renders it.
///
/// A missing field reads as `undefined`.
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(value) => value_text(value),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => number_text(f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Prints a float the way a JS number prints.
pub fn number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{value:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        }
    } else {
        value.to_string()
    }
}

/// `parseFloat` over a raw field.
pub fn parse_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_float_str(s),
        Some(other @ Value::Array(_)) => parse_float_str(&value_text(other)),
        _ => f64::NAN,
    }
}

/// `parseInt` (radix 10, `0x` prefix for hex) over a raw field.
pub fn parse_int(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Some(i),
            None => parse_int_str(&value_text(&Value::Number(n.clone()))),
        },
        Some(Value::String(s)) => parse_int_str(s),
        Some(other @ Value::Array(_)) => parse_int_str(&value_text(other)),
        _ => None,
    }
}

fn is_js_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Longest decimal literal at the start of `text`, NaN if there is none.
pub fn parse_float_str(text: &str) -> f64 {
    let trimmed = text.trim_start_matches(is_js_whitespace);
    let (negative, rest) = split_sign(trimmed);

    if rest.starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let bytes = rest.as_bytes();
    let mut end = 0;
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let mut literal = String::with_capacity(end + 2);
    if int_digits == 0 {
        literal.push('0');
    }
    literal.push_str(&rest[..end]);

    let magnitude = literal.parse::<f64>().unwrap_or(f64::NAN);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Longest integer literal at the start of `text`, `None` if there is none.
pub fn parse_int_str(text: &str) -> Option<i64> {
    let trimmed = text.trim_start_matches(is_js_whitespace);
    let (negative, rest) = split_sign(trimmed);

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let len = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if len == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..len], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Strict `Number(text)` conversion, used for loose comparisons against `false`.
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }
    let (negative, rest) = split_sign(trimmed);
    let magnitude = if rest == "Infinity" {
        f64::INFINITY
    } else if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        if negative {
            return f64::NAN;
        }
        u64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN)
    } else if rest.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
        rest.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    };
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
