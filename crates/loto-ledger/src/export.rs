use chrono::NaiveDate;

use crate::entry::DrawEntry;

/// Render history as `number,timestamp` lines in draw order.
///
/// No header and no trailing newline; timestamps are written verbatim.
pub fn to_csv(entries: &[DrawEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{},{}", e.number, e.timestamp))
        .collect::<Vec<_>>()
        .join("\n")
}

/// File name used when the operator does not pick one.
pub fn default_export_file_name(date: NaiveDate) -> String {
    format!("lo-to-mien-nam-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loto_types::DrawNumber;

    #[test]
    fn csv_lines_in_draw_order() {
        let entries = vec![
            DrawEntry::new(DrawNumber::new(7).unwrap(), "10:00:00 01/02/2026"),
            DrawEntry::new(DrawNumber::new(45).unwrap(), "10:01:30 01/02/2026"),
        ];
        assert_eq!(
            to_csv(&entries),
            "07,10:00:00 01/02/2026\n45,10:01:30 01/02/2026"
        );
    }

    #[test]
    fn empty_history_is_empty_csv() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn default_name_carries_date() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(default_export_file_name(date), "lo-to-mien-nam-2026-02-03.csv");
    }
}
