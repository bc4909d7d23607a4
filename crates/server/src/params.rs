//! Path parameter parsing.

/// Integer prefix of `raw`, read the way JavaScript's `parseInt` reads it:
/// leading whitespace and one sign are skipped, `0x` switches to hex, and
/// parsing stops at the first non-digit. `None` stands for NaN, which also
/// covers a digit run too large for `i64`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (radix, digits) = match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let value = i64::from_str_radix(digits.get(..end)?, radix).ok()?;
    Some(if negative { -value } else { value })
}

/// How a parsed id is echoed back in error messages.
pub fn display_id(id: Option<i64>) -> String {
    id.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_leading_integer() {
        assert_eq!(parse_int("5"), Some(5));
        assert_eq!(parse_int("  7"), Some(7));
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("3.9"), Some(3));
        assert_eq!(parse_int("-4"), Some(-4));
        assert_eq!(parse_int("+8"), Some(8));
        assert_eq!(parse_int("0x1A"), Some(26));
    }

    #[test]
    fn non_numeric_is_nan() {
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(display_id(parse_int("abc")), "NaN");
        assert_eq!(display_id(parse_int("99")), "99");
    }

    #[test]
    fn digits_past_i64_are_nan() {
        assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_int("9223372036854775808"), None);
        assert_eq!(parse_int("99999999999999999999abc"), None);
        assert_eq!(display_id(parse_int("99999999999999999999")), "NaN");
    }
}
