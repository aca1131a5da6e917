use chrono::NaiveDate;

use crate::models::DaySlots;

/// Parse the admin schedule-text format: one line per date,
/// `YYYY-MM-DD:HH:MM,HH:MM,...`. Blank lines and lines whose date part does
/// not parse as a calendar date are ignored. Duplicate time labels are kept
/// as-is here; the store collapses them on replace.
pub fn parse_schedule_text(text: &str) -> Vec<DaySlots> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }

            let (date_part, times) = match line.split_once(':') {
                Some((date, times)) => (date, times),
                None => (line, ""),
            };

            let date = NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()?;
            let slots = times
                .split(',')
                .map(str::trim)
                .filter(|slot| !slot.is_empty())
                .map(String::from)
                .collect();

            Some(DaySlots { date, slots })
        })
        .collect()
}

/// Render a schedule back to the admin text format.
pub fn format_schedule_text(schedule: &[DaySlots]) -> String {
    schedule
        .iter()
        .map(|day| format!("{}:{}", day.date.format("%Y-%m-%d"), day.slots.join(",")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_dates_and_times() {
        let parsed = parse_schedule_text("2025-05-23:10:00,13:00\n2025-05-24:09:30");
        assert_eq!(
            parsed,
            vec![
                DaySlots {
                    date: date("2025-05-23"),
                    slots: vec!["10:00".to_string(), "13:00".to_string()],
                },
                DaySlots {
                    date: date("2025-05-24"),
                    slots: vec!["09:30".to_string()],
                },
            ]
        );
    }

    #[test]
    fn ignores_blank_and_unparseable_lines() {
        let parsed = parse_schedule_text("\n  \nnot-a-date:10:00\n2025-05-23:10:00\n");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].date, date("2025-05-23"));
    }

    #[test]
    fn date_without_times_parses_as_empty() {
        let parsed = parse_schedule_text("2025-06-01");
        assert_eq!(
            parsed,
            vec![DaySlots {
                date: date("2025-06-01"),
                slots: vec![],
            }]
        );
    }

    #[test]
    fn trims_whitespace_and_drops_empty_labels() {
        let parsed = parse_schedule_text("2025-05-23: 10:00 , ,13:00");
        assert_eq!(parsed[0].slots, vec!["10:00".to_string(), "13:00".to_string()]);
    }

    #[test]
    fn round_trips_through_formatter() {
        let text = "2025-05-23:10:00,13:00\n2025-06-01:09:00";
        let parsed = parse_schedule_text(text);
        assert_eq!(format_schedule_text(&parsed), text);
    }
}
