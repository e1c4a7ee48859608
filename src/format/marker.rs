//! Compact notation for prices below 0.001
//!
//! A marker keeps the leading-zero count of the fractional part and the first
//! significant digits, written as `0.0{<zeros>}<digits>`. For example
//! `0.00000080` renders as `0.0{6}80`.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PREFIX: &str = "0.0{";
const MAX_SCALE: usize = 28;

/// Errors decoding a compact marker string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerParseError {
    /// String does not start with `0.0{`
    #[error("missing compact marker prefix: {0}")]
    MissingPrefix(String),
    /// No closing brace after the zero count
    #[error("unterminated zero count: {0}")]
    Unterminated(String),
    /// Zero count is not an unsigned integer
    #[error("invalid zero count: {0}")]
    InvalidZeroCount(String),
    /// Significant digits are empty, non-numeric, or start with zero
    #[error("invalid significant digits: {0:?}")]
    InvalidDigits(String),
}

/// Decoded form of a compact small-number marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactMarker {
    /// Whether the original value was negative
    pub negative: bool,
    /// Zero digits between the decimal point and the first significant digit
    pub leading_zeros: usize,
    /// Significant digits kept after the zero run
    pub digits: String,
}

impl CompactMarker {
    /// Create a marker from its parts
    pub fn new(negative: bool, leading_zeros: usize, digits: impl Into<String>) -> Self {
        Self {
            negative,
            leading_zeros,
            digits: digits.into(),
        }
    }

    /// Value the marker stands for, truncated to its significant digits
    ///
    /// Returns `None` when the value needs more than 28 fractional digits.
    pub fn to_decimal(&self) -> Option<Decimal> {
        if self.leading_zeros + self.digits.len() > MAX_SCALE {
            return None;
        }
        let sign = if self.negative { "-" } else { "" };
        let text = format!("{}0.{}{}", sign, "0".repeat(self.leading_zeros), self.digits);
        Decimal::from_str(&text).ok()
    }
}

impl fmt::Display for CompactMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}{}}}{}", PREFIX, self.leading_zeros, self.digits)
    }
}

impl FromStr for CompactMarker {
    type Err = MarkerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let body = unsigned
            .strip_prefix(PREFIX)
            .ok_or_else(|| MarkerParseError::MissingPrefix(s.to_string()))?;

        let (count, digits) = body
            .split_once('}')
            .ok_or_else(|| MarkerParseError::Unterminated(s.to_string()))?;

        let leading_zeros = count
            .parse::<usize>()
            .map_err(|_| MarkerParseError::InvalidZeroCount(count.to_string()))?;

        let valid_digits = !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0');
        if !valid_digits {
            return Err(MarkerParseError::InvalidDigits(digits.to_string()));
        }

        Ok(Self::new(negative, leading_zeros, digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        let marker = CompactMarker::new(false, 3, "123");
        assert_eq!(marker.to_string(), "0.0{3}123");
    }

    #[test]
    fn test_display_negative() {
        let marker = CompactMarker::new(true, 6, "80");
        assert_eq!(marker.to_string(), "-0.0{6}80");
    }

    #[test]
    fn test_parse() {
        let marker: CompactMarker = "0.0{7}803".parse().unwrap();
        assert!(!marker.negative);
        assert_eq!(marker.leading_zeros, 7);
        assert_eq!(marker.digits, "803");
    }

    #[test]
    fn test_parse_negative() {
        let marker: CompactMarker = "-0.0{3}1".parse().unwrap();
        assert!(marker.negative);
        assert_eq!(marker.leading_zeros, 3);
        assert_eq!(marker.digits, "1");
    }

    #[test]
    fn test_parse_rejects_plain_number() {
        assert_eq!(
            "0.50000".parse::<CompactMarker>(),
            Err(MarkerParseError::MissingPrefix("0.50000".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_bad_parts() {
        assert!(matches!(
            "0.0{3123".parse::<CompactMarker>(),
            Err(MarkerParseError::Unterminated(_))
        ));
        assert!(matches!(
            "0.0{x}123".parse::<CompactMarker>(),
            Err(MarkerParseError::InvalidZeroCount(_))
        ));
        assert!(matches!(
            "0.0{3}".parse::<CompactMarker>(),
            Err(MarkerParseError::InvalidDigits(_))
        ));
        assert!(matches!(
            "0.0{3}012".parse::<CompactMarker>(),
            Err(MarkerParseError::InvalidDigits(_))
        ));
    }

    #[test]
    fn test_to_decimal() {
        let marker = CompactMarker::new(false, 3, "123");
        assert_eq!(marker.to_decimal(), Some(dec!(0.000123)));

        let marker = CompactMarker::new(true, 6, "80");
        assert_eq!(marker.to_decimal(), Some(dec!(-0.00000080)));
    }

    #[test]
    fn test_to_decimal_out_of_range() {
        let marker = CompactMarker::new(false, 40, "1");
        assert_eq!(marker.to_decimal(), None);
    }
}
