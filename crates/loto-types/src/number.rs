use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A single drawn (or ticketed) number in `1..=90`.
///
/// Always rendered as a two-digit, zero-padded decimal string (`"07"`), and
/// serialized the same way so persisted history stays human-readable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DrawNumber(u8);

impl DrawNumber {
    /// Smallest drawable number.
    pub const MIN: u8 = 1;
    /// Largest drawable number.
    pub const MAX: u8 = 90;

    /// Create a draw number from an integer, rejecting values outside `1..=90`.
    pub fn new(value: u8) -> Result<Self, TypeError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeError::InvalidNumber(value.to_string()))
        }
    }

    /// Parse operator input. Surrounding whitespace is ignored and leading
    /// zeros are accepted, anything other than decimal digits is not.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let trimmed = raw.trim();
        let invalid = || TypeError::InvalidNumber(raw.to_string());

        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u32 = trimmed.parse().map_err(|_| invalid())?;
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(invalid()),
        }
    }

    /// The integer value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Iterate every drawable number in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl fmt::Debug for DrawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DrawNumber({:02})", self.0)
    }
}

impl fmt::Display for DrawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for DrawNumber {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DrawNumber {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DrawNumber> for String {
    fn from(number: DrawNumber) -> Self {
        number.to_string()
    }
}

impl PartialEq<str> for DrawNumber {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for DrawNumber {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_digit_is_zero_padded() {
        let n = DrawNumber::parse("7").unwrap();
        assert_eq!(n.to_string(), "07");
        assert_eq!(n.value(), 7);
    }

    #[test]
    fn leading_zeros_and_whitespace_accepted() {
        assert_eq!(DrawNumber::parse(" 007 ").unwrap().value(), 7);
        assert_eq!(DrawNumber::parse("90").unwrap().value(), 90);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(DrawNumber::parse("1").is_ok());
        assert!(DrawNumber::parse("90").is_ok());
        assert!(DrawNumber::parse("0").is_err());
        assert!(DrawNumber::parse("91").is_err());
    }

    #[test]
    fn non_numeric_rejected() {
        for raw in ["", "  ", "abc", "7a", "-7", "+7", "7.0", "٧"] {
            assert_eq!(
                DrawNumber::parse(raw),
                Err(TypeError::InvalidNumber(raw.to_string())),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn huge_input_rejected_without_overflow() {
        assert!(DrawNumber::parse("99999999999999999999").is_err());
    }

    #[test]
    fn serde_uses_padded_string() {
        let n = DrawNumber::new(5).unwrap();
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"05\"");
        let back: DrawNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<DrawNumber>("\"95\"").is_err());
        assert!(serde_json::from_str::<DrawNumber>("7").is_err());
    }

    #[test]
    fn all_covers_full_range() {
        let all: Vec<_> = DrawNumber::all().collect();
        assert_eq!(all.len(), 90);
        assert_eq!(all[0].to_string(), "01");
        assert_eq!(all[89].to_string(), "90");
    }

    #[test]
    fn compares_with_str() {
        let n = DrawNumber::new(23).unwrap();
        assert!(n == "23");
        assert!(n != "2");
    }

    proptest! {
        #[test]
        fn in_range_values_format_to_two_digits(v in 1u8..=90) {
            let n = DrawNumber::parse(&v.to_string()).unwrap();
            prop_assert_eq!(n.value(), v);
            prop_assert_eq!(n.to_string(), format!("{v:02}"));
        }

        #[test]
        fn out_of_range_values_rejected(v in 91u32..100_000) {
            prop_assert!(DrawNumber::parse(&v.to_string()).is_err());
        }

        #[test]
        fn text_with_letters_rejected(s in "[0-9]{0,2}[a-zA-Z]+[0-9]{0,2}") {
            prop_assert!(DrawNumber::parse(&s).is_err());
        }
    }
}
