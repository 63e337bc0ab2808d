use loto_types::{DrawNumber, TICKET_SIZE};
use serde::Serialize;

/// Outcome for one ticket slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchResult<T = DrawNumber> {
    /// 1-based slot on the ticket.
    pub position: usize,
    pub ticket_number: T,
    /// The history value consumed by this slot, if any.
    pub drawn_number: Option<T>,
    #[serde(rename = "match")]
    pub matched: bool,
}

/// Per-slot results for a whole ticket plus the win flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verification<T = DrawNumber> {
    pub results: [MatchResult<T>; TICKET_SIZE],
    pub is_winner: bool,
}

impl<T> Verification<T> {
    pub fn match_count(&self) -> usize {
        self.results.iter().filter(|r| r.matched).count()
    }

    /// 1-based positions that matched, in ticket order.
    pub fn matched_positions(&self) -> Vec<usize> {
        self.results
            .iter()
            .filter(|r| r.matched)
            .map(|r| r.position)
            .collect()
    }
}

/// Match a ticket against draw history.
///
/// Slots are processed in ticket order. Each slot takes the earliest draw of
/// equal value that no earlier slot has taken, so a single draw never
/// satisfies two slots. The ticket wins when every slot found a draw.
///
/// Callers are expected to hold at least
/// [`MIN_DRAWS_FOR_VERIFY`](crate::MIN_DRAWS_FOR_VERIFY) draws; see
/// [`DrawLedger::verify_ticket`](crate::DrawLedger::verify_ticket).
pub fn verify<T: PartialEq + Clone>(ticket: &[T; TICKET_SIZE], drawn: &[T]) -> Verification<T> {
    let mut consumed = vec![false; drawn.len()];

    let results: [MatchResult<T>; TICKET_SIZE] = std::array::from_fn(|i| {
        let wanted = &ticket[i];
        let hit = drawn
            .iter()
            .enumerate()
            .find(|(j, value)| !consumed[*j] && *value == wanted)
            .map(|(j, _)| j);

        if let Some(j) = hit {
            consumed[j] = true;
        }
        MatchResult {
            position: i + 1,
            ticket_number: wanted.clone(),
            drawn_number: hit.map(|j| drawn[j].clone()),
            matched: hit.is_some(),
        }
    });

    let is_winner = results.iter().all(|r| r.matched);
    Verification { results, is_winner }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn partial_match_with_absent_number() {
        let history = ["07", "23", "45", "12", "09"];
        let ticket = ["07", "12", "99", "45", "23"];
        let v = verify(&ticket, &history);

        assert_eq!(v.matched_positions(), vec![1, 2, 4, 5]);
        assert_eq!(v.results[0].drawn_number, Some("07"));
        assert_eq!(v.results[1].drawn_number, Some("12"));
        assert_eq!(v.results[3].drawn_number, Some("45"));
        assert_eq!(v.results[4].drawn_number, Some("23"));
        assert_eq!(v.results[2].drawn_number, None);
        assert!(!v.results[2].matched);
        assert!(!v.is_winner);
        assert_eq!(v.match_count(), 4);
    }

    #[test]
    fn one_draw_satisfies_one_slot() {
        let history = ["07", "10", "20", "30", "40"];
        let ticket = ["07", "07", "01", "02", "03"];
        let v = verify(&ticket, &history);

        assert!(v.results[0].matched);
        assert_eq!(v.results[0].drawn_number, Some("07"));
        assert!(!v.results[1].matched);
        assert_eq!(v.results[1].drawn_number, None);
        assert_eq!(v.match_count(), 1);
        assert!(!v.is_winner);
    }

    #[test]
    fn repeated_ticket_number_needs_repeated_draws() {
        let history = ["07", "11", "07", "12", "13", "14"];
        let ticket = ["07", "07", "12", "13", "14"];
        let v = verify(&ticket, &history);
        assert!(v.is_winner);
    }

    #[test]
    fn any_order_wins() {
        let history = ["01", "02", "03", "04", "05", "06", "07"];
        let ticket = ["06", "02", "07", "01", "04"];
        let v = verify(&ticket, &history);
        assert!(v.is_winner);
        assert!(v.results.iter().all(|r| r.matched));
        assert_eq!(v.match_count(), 5);
    }

    #[test]
    fn positions_are_one_based_in_ticket_order() {
        let history = ["01", "02", "03", "04", "05"];
        let ticket = ["05", "04", "03", "02", "01"];
        let v = verify(&ticket, &history);
        let positions: Vec<usize> = v.results.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
        assert_eq!(v.results[0].ticket_number, "05");
    }

    #[test]
    fn empty_history_matches_nothing() {
        let v = verify(&["01", "02", "03", "04", "05"], &[]);
        assert_eq!(v.match_count(), 0);
        assert!(!v.is_winner);
    }

    #[test]
    fn works_on_draw_numbers() {
        let n = |v| DrawNumber::new(v).unwrap();
        let history = vec![n(7), n(23), n(45), n(12), n(9)];
        let ticket = [n(9), n(12), n(45), n(23), n(7)];
        let v = verify(&ticket, &history);
        assert!(v.is_winner);
    }

    #[test]
    fn serializes_match_field() {
        let v = verify(&["01", "02", "03", "04", "05"], &["01"]);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["results"][0]["match"], true);
        assert_eq!(json["results"][0]["drawn_number"], "01");
        assert_eq!(json["results"][1]["match"], false);
        assert!(json["results"][1]["drawn_number"].is_null());
        assert_eq!(json["is_winner"], false);
    }

    proptest! {
        #[test]
        fn no_draw_index_is_used_twice(
            ticket in proptest::array::uniform5(1u8..=10),
            drawn in proptest::collection::vec(1u8..=10, 0..20),
        ) {
            let v = verify(&ticket, &drawn);
            for value in 1u8..=10 {
                let used = v
                    .results
                    .iter()
                    .filter(|r| r.matched && r.ticket_number == value)
                    .count();
                let available = drawn.iter().filter(|d| **d == value).count();
                let wanted = ticket.iter().filter(|t| **t == value).count();
                prop_assert_eq!(used, available.min(wanted));
            }
            prop_assert_eq!(v.is_winner, v.match_count() == TICKET_SIZE);
        }
    }
}
