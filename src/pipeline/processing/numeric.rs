use serde::Serialize;

use crate::error::{CleanerError, Result};
use crate::table::{Table, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoercionSummary {
    /// Missing values replaced by the default
    pub filled: usize,
    /// Values that lost a fractional part
    pub truncated: usize,
}

/// Parse a decimal literal and truncate it toward zero.
/// Returns `None` for text that is not a finite number within `i64` range.
pub fn parse_truncated(text: &str) -> Option<(i64, bool)> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some((n, false));
    }

    let x = trimmed.parse::<f64>().ok()?;
    if !x.is_finite() {
        return None;
    }
    let t = x.trunc();
    // i64::MAX is not representable as f64; the bound below is 2^63
    if t < i64::MIN as f64 || t >= i64::MAX as f64 {
        return None;
    }
    Some((t as i64, t != x))
}

/// Replace missing values with `default`, then convert every value of
/// `column` to an integer. Any other non-numeric value is fatal.
pub fn coerce_integer_column(table: &mut Table, column: &str, default: i64) -> Result<CoercionSummary> {
    let dataset = table.dataset();
    let target = table.column_mut(column)?;
    let mut summary = CoercionSummary::default();

    for (row, value) in target.values_mut().iter_mut().enumerate() {
        let coerced = match value {
            Value::Integer(n) => *n,
            Value::Missing => {
                summary.filled += 1;
                default
            }
            Value::Text(text) => match parse_truncated(text) {
                Some((n, truncated)) => {
                    if truncated {
                        summary.truncated += 1;
                    }
                    n
                }
                None => {
                    return Err(CleanerError::NonNumeric {
                        dataset,
                        column: column.to_string(),
                        row,
                        value: text.clone(),
                    })
                }
            },
            other => {
                return Err(CleanerError::NonNumeric {
                    dataset,
                    column: column.to_string(),
                    row,
                    value: other.to_string(),
                })
            }
        };
        *value = Value::Integer(coerced);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn orders(prices: &[Option<&str>]) -> Table {
        Table::from_records(
            Dataset::Orders,
            vec!["order_id".to_string(), "total_price".to_string()],
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    vec![
                        Value::Text(i.to_string()),
                        p.map(|s| Value::Text(s.to_string())).unwrap_or(Value::Missing),
                    ]
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_fill_and_truncate() {
        let mut table = orders(&[Some("19.9"), None, Some("5")]);
        let summary = coerce_integer_column(&mut table, "total_price", 0).unwrap();

        assert_eq!(
            table.column("total_price").unwrap().values(),
            vec![Value::Integer(19), Value::Integer(0), Value::Integer(5)]
        );
        assert_eq!(summary, CoercionSummary { filled: 1, truncated: 1 });
        // Other columns are untouched
        assert_eq!(table.column("order_id").unwrap().values()[0], Value::Text("0".to_string()));
    }

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(parse_truncated("-3.7"), Some((-3, true)));
        assert_eq!(parse_truncated("2.0"), Some((2, false)));
        assert_eq!(parse_truncated("1e3"), Some((1000, false)));
        assert_eq!(parse_truncated(" 42 "), Some((42, false)));
        assert_eq!(parse_truncated("9223372036854775807"), Some((i64::MAX, false)));
    }

    #[test]
    fn test_rejects_non_finite_and_text() {
        assert_eq!(parse_truncated("inf"), None);
        assert_eq!(parse_truncated("abc"), None);
        assert_eq!(parse_truncated("1e30"), None);
    }

    #[test]
    fn test_non_numeric_value_is_fatal() {
        let mut table = orders(&[Some("10"), Some("ten")]);
        let err = coerce_integer_column(&mut table, "total_price", 0).unwrap_err();

        match err {
            CleanerError::NonNumeric { dataset, column, row, value } => {
                assert_eq!(dataset, Dataset::Orders);
                assert_eq!(column, "total_price");
                assert_eq!(row, 1);
                assert_eq!(value, "ten");
            }
            other => panic!("expected NonNumeric, got {:?}", other),
        }
    }

    #[test]
    fn test_already_integer_column_is_stable() {
        let mut table = orders(&[Some("3"), None]);
        coerce_integer_column(&mut table, "total_price", 0).unwrap();
        let summary = coerce_integer_column(&mut table, "total_price", 0).unwrap();

        assert_eq!(summary, CoercionSummary::default());
        assert_eq!(
            table.column("total_price").unwrap().values(),
            vec![Value::Integer(3), Value::Integer(0)]
        );
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let mut table = orders(&[Some("1")]);
        assert!(matches!(
            coerce_integer_column(&mut table, "amount", 0),
            Err(CleanerError::MissingColumn { .. })
        ));
    }
}
