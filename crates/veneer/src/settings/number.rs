//! Lenient number parsing for form inputs.
//!
//! Inputs report their contents as strings. Numeric controls read the longest
//! numeric prefix and yield `NaN` when there is none, so `"12px"` reads as 12
//! and `"abc"` as `NaN`.

/// Integer prefix parse. Leading whitespace and a sign are accepted, as is a
/// `0x` prefix for hexadecimal digits.
pub fn parse_int(s: &str) -> f64 {
    let s = s.trim_start();
    let (negative, rest) = split_sign(s);
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let mut value: Option<f64> = None;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        value = Some(value.unwrap_or(0.0) * f64::from(radix) + f64::from(d));
    }
    match value {
        Some(v) if negative => -v,
        Some(v) => v,
        None => f64::NAN,
    }
}

/// Floating point prefix parse: `[sign] digits [. digits] [e [sign] digits]`
/// or `[sign] Infinity`.
pub fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    let (negative, rest) = split_sign(s);
    if rest.starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let bytes = rest.as_bytes();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_len = count_digits(0);
    let mut end = int_len;
    let mut frac_len = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_len = count_digits(end + 1);
        end += 1 + frac_len;
    }
    if int_len == 0 && frac_len == 0 {
        return f64::NAN;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_len = count_digits(end + 1 + sign);
        if exp_len > 0 {
            end += 1 + sign + exp_len;
        }
    }

    let literal = rest[..end].trim_end_matches('.');
    match literal.parse::<f64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) => f64::NAN,
    }
}

/// Split an optional leading `+` or `-`.
fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_prefixes() {
        assert_eq!(parse_int("42"), 42.0);
        assert_eq!(parse_int("  -7 apples"), -7.0);
        assert_eq!(parse_int("3.9"), 3.0);
        assert_eq!(parse_int("0x1f"), 31.0);
        assert!(parse_int("abc").is_nan());
        assert!(parse_int("").is_nan());
        assert!(parse_int("-").is_nan());
    }

    #[test]
    fn float_prefixes() {
        assert_eq!(parse_float("80"), 80.0);
        assert_eq!(parse_float("2.5kg"), 2.5);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e3x"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float(".").is_nan());
        assert!(parse_float("x1").is_nan());
    }
}
