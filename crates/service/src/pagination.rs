//! `?limit=` handling for list endpoints
//!
//! The raw query value is applied the way a JavaScript `slice(0, limit)` would
//! apply it: it is coerced to a number, truncated toward zero, and a negative
//! value counts back from the end of the list. Nothing is rejected.

/// Keep the first `limit` items. An absent or empty `limit` keeps everything.
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<&str>) -> Vec<T> {
    let Some(raw) = limit.filter(|l| !l.is_empty()) else {
        return items;
    };
    let end = slice_end(to_number(raw), items.len());
    items.truncate(end);
    items
}

/// Numeric coercion of a query string: surrounding whitespace is ignored,
/// blank text is `0`, `0x`/`0o`/`0b` prefixes are honoured and anything
/// unparsable is NaN.
pub fn to_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }
    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return text
            .get(2..)
            .and_then(|digits| u64::from_str_radix(digits, radix).ok())
            .map_or(f64::NAN, |v| v as f64);
    }

    // f64::from_str also takes "inf"/"nan", which are not numbers here.
    let decimal_chars = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn slice_end(limit: f64, len: usize) -> usize {
    if limit.is_nan() {
        return 0;
    }
    let limit = limit.trunc();
    let len = len as f64;
    let end = if limit < 0.0 { (len + limit).max(0.0) } else { limit.min(len) };
    end as usize
}
