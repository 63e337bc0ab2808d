use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::number::DrawNumber;

/// Number of slots on a ticket.
pub const TICKET_SIZE: usize = 5;

/// A five-number ticket submitted for verification.
///
/// Numbers need not be distinct; a ticket holding the same number twice
/// needs that number drawn twice to match both slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket([DrawNumber; TICKET_SIZE]);

impl Ticket {
    pub fn new(numbers: [DrawNumber; TICKET_SIZE]) -> Self {
        Self(numbers)
    }

    /// Parse a comma-separated list such as `"07, 12,45,23 ,9"`.
    ///
    /// Empty pieces are dropped before counting, so trailing commas are
    /// harmless. Count is checked before any number is validated.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let pieces: Vec<&str> = input
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect();

        if pieces.len() != TICKET_SIZE {
            return Err(TypeError::InvalidTicket {
                expected: TICKET_SIZE,
                actual: pieces.len(),
            });
        }

        let numbers = pieces
            .into_iter()
            .map(DrawNumber::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(numbers)
    }

    pub fn numbers(&self) -> &[DrawNumber; TICKET_SIZE] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawNumber> {
        self.0.iter()
    }
}

impl TryFrom<Vec<DrawNumber>> for Ticket {
    type Error = TypeError;

    fn try_from(numbers: Vec<DrawNumber>) -> Result<Self, Self::Error> {
        let actual = numbers.len();
        let arr: [DrawNumber; TICKET_SIZE] = numbers
            .try_into()
            .map_err(|_| TypeError::InvalidTicket {
                expected: TICKET_SIZE,
                actual,
            })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_numbers() {
        let ticket = Ticket::parse("7, 12,45 ,23,9").unwrap();
        assert_eq!(ticket.to_string(), "07, 12, 45, 23, 09");
    }

    #[test]
    fn parse_ignores_empty_pieces() {
        let ticket = Ticket::parse("1,2,,3,4,5,").unwrap();
        assert_eq!(ticket.numbers()[4].value(), 5);
    }

    #[test]
    fn parse_allows_repeated_numbers() {
        let ticket = Ticket::parse("07,07,01,02,03").unwrap();
        assert_eq!(ticket.numbers()[0], ticket.numbers()[1]);
    }

    #[test]
    fn parse_rejects_wrong_count() {
        assert_eq!(
            Ticket::parse("1,2,3,4"),
            Err(TypeError::InvalidTicket { expected: 5, actual: 4 })
        );
        assert_eq!(
            Ticket::parse("1,2,3,4,5,6"),
            Err(TypeError::InvalidTicket { expected: 5, actual: 6 })
        );
        assert_eq!(
            Ticket::parse("   "),
            Err(TypeError::InvalidTicket { expected: 5, actual: 0 })
        );
    }

    #[test]
    fn parse_names_bad_piece() {
        assert_eq!(
            Ticket::parse("1,2,99,4,5"),
            Err(TypeError::InvalidNumber("99".into()))
        );
    }

    #[test]
    fn try_from_vec_checks_length() {
        let three = vec![DrawNumber::new(1).unwrap(); 3];
        assert!(Ticket::try_from(three).is_err());
    }
}
