//! Extraction of a draw number from dictated text.
//!
//! Callers read numbers aloud; speech recognizers hand back either digits
//! (`"số 23"`) or Vietnamese number words (`"hai mươi ba"`). Both forms are
//! accepted here.

use std::sync::OnceLock;

use crate::number::DrawNumber;

const UNITS: [&str; 10] = [
    "", "một", "hai", "ba", "bốn", "năm", "sáu", "bảy", "tám", "chín",
];

/// Vietnamese spoken form of `n` (`1..=90`).
///
/// Follows everyday reading: `15` is "mười lăm", `21` is "hai mươi mốt",
/// `25` is "hai mươi lăm".
pub fn spoken_form(n: DrawNumber) -> String {
    let value = n.value() as usize;
    let (tens, units) = (value / 10, value % 10);

    let head = match tens {
        0 => return UNITS[units].to_string(),
        1 => "mười".to_string(),
        t => format!("{} mươi", UNITS[t]),
    };
    match units {
        0 => head,
        1 if tens > 1 => format!("{head} mốt"),
        5 => format!("{head} lăm"),
        u => format!("{head} {}", UNITS[u]),
    }
}

fn phrase_table() -> &'static [(String, DrawNumber)] {
    static TABLE: OnceLock<Vec<(String, DrawNumber)>> = OnceLock::new();
    TABLE.get_or_init(|| DrawNumber::all().map(|n| (spoken_form(n), n)).collect())
}

/// Pull a draw number out of free text.
///
/// If the text contains digits, the first one or two consecutive digits
/// decide the result and words are not consulted; an out-of-range value
/// yields `None`. Otherwise the longest spoken form contained in the text
/// wins, so "hai mươi mốt" reads as 21 rather than 2.
pub fn extract_number(text: &str) -> Option<DrawNumber> {
    if let Some(start) = text.find(|c: char| c.is_ascii_digit()) {
        let digits: String = text[start..]
            .chars()
            .take_while(char::is_ascii_digit)
            .take(2)
            .collect();
        return DrawNumber::parse(&digits).ok();
    }

    let lowered = text.to_lowercase();
    phrase_table()
        .iter()
        .filter(|(phrase, _)| lowered.contains(phrase.as_str()))
        .max_by_key(|(phrase, _)| phrase.chars().count())
        .map(|(_, n)| *n)
}
