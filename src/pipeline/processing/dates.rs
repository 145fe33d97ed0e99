use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::Result;
use crate::table::{Table, Value};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y%m%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateParseSummary {
    pub parsed: usize,
    pub unparseable: usize,
}

/// Parse a calendar date or timestamp; offsets are converted to UTC
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Convert every value of `column` to a timestamp. Values that fail to
/// parse, missing ones included, become `Value::Unparseable`.
pub fn parse_date_column(table: &mut Table, column: &str) -> Result<DateParseSummary> {
    let target = table.column_mut(column)?;
    let mut summary = DateParseSummary::default();

    for value in target.values_mut().iter_mut() {
        let parsed = match value {
            Value::Timestamp(ts) => Some(*ts),
            Value::Text(text) => parse_date(text),
            _ => None,
        };

        *value = match parsed {
            Some(ts) => {
                summary.parsed += 1;
                Value::Timestamp(ts)
            }
            None => {
                summary.unparseable += 1;
                Value::Unparseable
            }
        };
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_delivery_dates_with_bad_and_missing_values() {
        let mut table = Table::from_records(
            Dataset::Shipments,
            vec!["shipment_id".to_string(), "delivery_date".to_string()],
            vec![
                vec![Value::Text("1".to_string()), Value::Text("2024-01-05".to_string())],
                vec![Value::Text("2".to_string()), Value::Text("not-a-date".to_string())],
                vec![Value::Text("3".to_string()), Value::Missing],
            ],
        )
        .unwrap();

        let summary = parse_date_column(&mut table, "delivery_date").unwrap();

        assert_eq!(
            table.column("delivery_date").unwrap().values(),
            vec![Value::Timestamp(day(2024, 1, 5)), Value::Unparseable, Value::Unparseable]
        );
        assert_eq!(summary, DateParseSummary { parsed: 1, unparseable: 2 });
    }

    #[test]
    fn test_accepted_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 7, 14)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_date("2023-07-14 10:30:00"), Some(expected));
        assert_eq!(parse_date("2023-07-14T10:30:00"), Some(expected));
        assert_eq!(parse_date("2023-07-14 10:30"), Some(expected));
        assert_eq!(parse_date("2023-07-14T12:30:00+02:00"), Some(expected));

        assert_eq!(parse_date("2023/07/14"), Some(day(2023, 7, 14)));
        assert_eq!(parse_date("07/14/2023"), Some(day(2023, 7, 14)));
        assert_eq!(parse_date("07-14-2023"), Some(day(2023, 7, 14)));
    }

    #[test]
    fn test_spelled_out_and_compact_dates() {
        assert_eq!(parse_date("Jan 5, 2024"), Some(day(2024, 1, 5)));
        assert_eq!(parse_date("January 5, 2024"), Some(day(2024, 1, 5)));
        assert_eq!(parse_date("5 January 2024"), Some(day(2024, 1, 5)));
        assert_eq!(parse_date("20240105"), Some(day(2024, 1, 5)));
        assert_eq!(parse_date("20241305"), None);
    }

    #[test]
    fn test_invalid_calendar_dates_fail() {
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("NaT"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_reparsing_keeps_values() {
        let mut table = Table::from_records(
            Dataset::Orders,
            vec!["order_date".to_string()],
            vec![
                vec![Value::Text("2024-03-01".to_string())],
                vec![Value::Text("NaT".to_string())],
            ],
        )
        .unwrap();

        parse_date_column(&mut table, "order_date").unwrap();
        let first = table.column("order_date").unwrap().values().to_vec();
        parse_date_column(&mut table, "order_date").unwrap();

        assert_eq!(table.column("order_date").unwrap().values(), first);
        assert_eq!(first[1], Value::Unparseable);
    }
}
