//! Numeric coercion for loosely formatted sheet amounts.
//!
//! This is the only place where raw sheet strings become numbers. The policy
//! is total: any value that does not yield a finite number becomes `0.0`.

/// Coerces a sheet amount such as `"₹1,20,000"` or `" 1,499.00 "` to `f64`.
///
/// Every character other than an ASCII digit, `.` or `-` is dropped, then
/// the longest leading numeric literal of the remainder is parsed, so
/// `"₹1,20,000/-"` still yields `120000`. Empty input, a remainder with no
/// leading literal, or a non-finite result yields exactly `0.0`.
pub fn coerce_amount(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();
    let literal = leading_literal(&cleaned);
    if literal.is_empty() {
        return 0.0;
    }
    match literal.parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => 0.0,
    }
}

/// Returns the longest prefix shaped like `-?digits(.digits)?`, or `""` when
/// the prefix contains no digit at all.
fn leading_literal(cleaned: &str) -> &str {
    let bytes = cleaned.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let mut digits = 0usize;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut fraction_end = end + 1;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
            digits += 1;
        }
        end = fraction_end;
    }
    if digits == 0 { "" } else { &cleaned[..end] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_and_grouping() {
        assert_eq!(coerce_amount("₹1,20,000"), 120000.0);
        assert_eq!(coerce_amount("Rs 1,499.50"), 1499.5);
        assert_eq!(coerce_amount("  42  "), 42.0);
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount("-"), 0.0);
        assert_eq!(coerce_amount("."), 0.0);
        assert_eq!(coerce_amount("--5"), 0.0);
    }

    #[test]
    fn test_negative() {
        assert_eq!(coerce_amount("-50"), -50.0);
        assert_eq!(coerce_amount("-.5"), -0.5);
    }

    #[test]
    fn test_trailing_noise_after_literal() {
        assert_eq!(coerce_amount("₹1,20,000/-"), 120000.0);
        assert_eq!(coerce_amount("1.2.3"), 1.2);
        assert_eq!(coerce_amount("5-3"), 5.0);
    }

    #[test]
    fn test_overflow_is_zero() {
        let huge = "9".repeat(400);
        assert_eq!(coerce_amount(&huge), 0.0);
    }
}
