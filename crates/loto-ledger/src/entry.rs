use std::fmt;

use loto_types::DrawNumber;
use serde::{Deserialize, Serialize};

/// One drawn number and the wall-clock time it was entered.
///
/// Persisted as `{"number": "07", "timestamp": "..."}`. The timestamp is
/// kept as the display string it was recorded with and never re-parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawEntry {
    pub number: DrawNumber,
    pub timestamp: String,
}

impl DrawEntry {
    pub fn new(number: DrawNumber, timestamp: impl Into<String>) -> Self {
        Self {
            number,
            timestamp: timestamp.into(),
        }
    }
}

impl fmt::Display for DrawEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.number, self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let entry = DrawEntry::new(DrawNumber::new(7).unwrap(), "10:00:00 01/01/2026");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"number": "07", "timestamp": "10:00:00 01/01/2026"})
        );
    }

    #[test]
    fn rejects_out_of_range_number() {
        let raw = r#"{"number": "91", "timestamp": "t"}"#;
        assert!(serde_json::from_str::<DrawEntry>(raw).is_err());
    }
}
