//! Input validation and result formatting

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{ConversionError, ConvertResult};

/// Number of decimal digits kept in a formatted result
pub const RESULT_PRECISION: usize = 6;

/// Plain decimal: optional sign, digits, at most one decimal point.
/// No exponents, separators or named values like "inf".
static DECIMAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").expect("valid decimal regex"));

/// Validate raw user text and parse it into a non-negative value.
///
/// Entry filtering on the front end is not trusted; pasted or programmatic
/// text goes through the same checks.
pub fn validate_input(raw: &str) -> ConvertResult<f64> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConversionError::EmptyInput);
    }

    if !DECIMAL_PATTERN.is_match(trimmed) {
        tracing::warn!("Rejected non-numeric input '{}'", trimmed);
        return Err(ConversionError::NotANumber(trimmed.to_string()));
    }

    let value = match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        // Digit strings long enough to overflow f64
        _ => return Err(ConversionError::NotANumber(trimmed.to_string())),
    };

    if value < 0.0 {
        tracing::warn!("Rejected negative input {}", value);
        return Err(ConversionError::NegativeValue(value));
    }

    // "-0" passes the sign check; normalize it
    Ok(if value == 0.0 { 0.0 } else { value })
}

/// Format a converted value for display.
///
/// Rounds to [`RESULT_PRECISION`] decimals using `{:.N}` formatting (nearest,
/// ties to even on the exact binary value), then trims trailing zeros and a
/// dangling decimal point. Never produces scientific notation.
pub fn format_result(value: f64) -> String {
    let fixed = format!("{:.*}", RESULT_PRECISION, value);

    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate_input(""), Err(ConversionError::EmptyInput));
        assert_eq!(validate_input("   \t"), Err(ConversionError::EmptyInput));
    }

    #[test]
    fn test_validate_not_a_number() {
        assert_eq!(
            validate_input("abc"),
            Err(ConversionError::NotANumber("abc".to_string()))
        );
        for raw in ["1.2.3", ".", "1e5", "1,000", "inf", "NaN", "12abc", "--5", "+"] {
            assert!(
                matches!(validate_input(raw), Err(ConversionError::NotANumber(_))),
                "expected NotANumber for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_validate_overflow_is_not_a_number() {
        let huge = format!("1{}", "0".repeat(400));
        assert!(matches!(validate_input(&huge), Err(ConversionError::NotANumber(_))));
    }

    #[test]
    fn test_validate_negative() {
        assert_eq!(validate_input("-5"), Err(ConversionError::NegativeValue(-5.0)));
        assert_eq!(validate_input("-0.25"), Err(ConversionError::NegativeValue(-0.25)));
    }

    #[test]
    fn test_validate_accepts_decimals() {
        assert_eq!(validate_input("3.5"), Ok(3.5));
        assert_eq!(validate_input("  42 "), Ok(42.0));
        assert_eq!(validate_input(".5"), Ok(0.5));
        assert_eq!(validate_input("7."), Ok(7.0));
        assert_eq!(validate_input("+2"), Ok(2.0));
        assert_eq!(validate_input("0"), Ok(0.0));
    }

    #[test]
    fn test_validate_negative_zero_normalized() {
        let value = validate_input("-0").unwrap();
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_format_examples() {
        assert_eq!(format_result(2.5), "2.5");
        assert_eq!(format_result(3.0), "3");
        assert_eq!(format_result(1.0000001), "1");
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(100.0), "100");
        assert_eq!(format_result(4.5359237), "4.535924");
    }

    #[test]
    fn test_format_rounds_at_six_decimals() {
        let formatted = format_result(0.1234565);
        assert!(formatted == "0.123456" || formatted == "0.123457", "{}", formatted);
        // Exact binary ties round to the even digit
        assert_eq!(format_result(0.0078125), "0.007812");
        assert_eq!(format_result(0.0234375), "0.023438");
        assert_eq!(format_result(0.9999999), "1");
        assert_eq!(format_result(0.0000004), "0");
    }

    #[test]
    fn test_format_never_negative_zero() {
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(-0.0000001), "0");
    }

    #[test]
    fn test_format_no_scientific_notation() {
        assert_eq!(format_result(1e21), "1000000000000000000000");
        assert_eq!(format_result(0.000001), "0.000001");
    }
}
