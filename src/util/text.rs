use std::{collections::HashSet, str::FromStr};

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

const NUMBER_ESCAPE_CHAR: &[char] = &['$', ',', ' ', '"', '\n'];

/// Parses a decimal value from a given string.
///
/// This function accepts a string representation of a decimal number,
/// potentially containing commas as thousands separators and other escape characters,
/// and attempts to convert it into a `Decimal`. If the conversion fails, an error is returned.
///
/// # Arguments
///
/// * `s`: A string slice containing the representation of a decimal number
///         that may include commas as thousands separators and other escape characters.
/// * `escape_chars`: Optional characters to be escaped from the input string.
///
/// # Example
///
/// ```
/// let s = "1,234.56";
/// let decimal_value = parse_decimal(s, None).unwrap();
/// ```
pub fn parse_decimal(s: &str, escape_chars: Option<Vec<char>>) -> Result<Decimal> {
    let cleaned = clean_escape_chars(s, escape_chars);
    Decimal::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as Decimal because {:?}", cleaned, why))
}

/// Parses an `i64` value from a given string.
///
/// # Example
///
/// ```
/// let s = "1,234";
/// let i64_value = parse_i64(s, None).unwrap();
/// ```
pub fn parse_i64(s: &str, escape_chars: Option<Vec<char>>) -> Result<i64> {
    let cleaned = clean_escape_chars(s, escape_chars);
    i64::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as i64 because: {:?}", cleaned, why))
}

/// Removes a set of escape characters from a given string.
///
/// # Example
///
/// ```
/// let s = "Hello$Wor^ld!@#";
/// let escape_chars = Some(vec!['^', '@', '#']);
/// let clean_s = clean_escape_chars(s, escape_chars);
/// assert_eq!(clean_s, "HelloWorld!");
/// ```
pub(crate) fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    let mut combined: Vec<char> = NUMBER_ESCAPE_CHAR.to_vec();
    if let Some(ec) = escape_chars {
        combined.extend(ec);
    }

    let filters = combined.iter().collect::<HashSet<_>>();
    s.chars().filter(|c| !filters.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("189.5000", None).unwrap(), dec!(189.5));
        assert_eq!(parse_decimal("1,234.56", None).unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal(" $12.30 ", None).unwrap(), dec!(12.3));
        assert_eq!(parse_decimal("(12.30)", Some(vec!['(', ')'])).unwrap(), dec!(12.3));
        assert!(parse_decimal("N/A", None).is_err());
    }

    #[test]
    fn test_parse_i64() {
        assert_eq!(parse_i64("53665715", None).unwrap(), 53_665_715);
        assert_eq!(parse_i64("1,234", None).unwrap(), 1234);
        assert!(parse_i64("12.5", None).is_err());
    }

    #[test]
    fn test_clean_escape_chars() {
        let clean_s = clean_escape_chars("Hello$Wor^ld!@#", Some(vec!['^', '@', '#']));
        assert_eq!(clean_s, "HelloWorld!");
    }
}
