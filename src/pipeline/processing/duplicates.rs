use serde::Serialize;
use std::collections::HashMap;

use crate::table::{Column, Value};

/// Outcome of marking one column's duplicate groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateResolution {
    /// Number of distinct values shared by more than one row
    pub groups: usize,
    /// Number of rows rewritten (every member of every group)
    pub rows_flagged: usize,
}

/// Group row indices by their value. Missing values are never grouped.
pub fn group_rows_by_key(values: &[Value]) -> HashMap<String, Vec<usize>> {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, value) in values.iter().enumerate() {
        if value.is_missing() {
            continue;
        }
        groups.entry(value.to_string()).or_default().push(i);
    }
    groups
}

/// Prepend `prefix` to every member of every duplicate group, first
/// occurrence included. Siblings stay equal to each other afterwards.
pub fn flag_duplicates(column: &mut Column, prefix: &str) -> DuplicateResolution {
    let groups = group_rows_by_key(column.values());
    let mut resolution = DuplicateResolution::default();

    for members in groups.values().filter(|members| members.len() > 1) {
        resolution.groups += 1;
        for &row in members {
            let values = column.values_mut();
            let original = values[row].to_string();
            values[row] = Value::Text(format!("{}{}", prefix, original));
            resolution.rows_flagged += 1;
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phones(values: &[Option<&str>]) -> Column {
        Column::new(
            "phone_number",
            values
                .iter()
                .map(|v| match v {
                    Some(s) => Value::Text(s.to_string()),
                    None => Value::Missing,
                })
                .collect(),
        )
    }

    fn texts(column: &Column) -> Vec<String> {
        column.values().iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_all_group_members_are_flagged() {
        let mut column = phones(&[Some("555-1111"), Some("555-1111"), Some("555-2222")]);
        let resolution = flag_duplicates(&mut column, "RP-");

        assert_eq!(texts(&column), vec!["RP-555-1111", "RP-555-1111", "555-2222"]);
        assert_eq!(resolution, DuplicateResolution { groups: 1, rows_flagged: 2 });
    }

    #[test]
    fn test_non_adjacent_groups() {
        let mut column = phones(&[
            Some("1"),
            Some("2"),
            Some("3"),
            Some("1"),
            Some("2"),
            Some("1"),
        ]);
        let resolution = flag_duplicates(&mut column, "RP-");

        assert_eq!(texts(&column), vec!["RP-1", "RP-2", "3", "RP-1", "RP-2", "RP-1"]);
        assert_eq!(resolution.groups, 2);
        assert_eq!(resolution.rows_flagged, 5);
    }

    #[test]
    fn test_missing_values_are_left_alone() {
        let mut column = phones(&[None, None, Some("555")]);
        let resolution = flag_duplicates(&mut column, "RP-");

        assert_eq!(column.values()[0], Value::Missing);
        assert_eq!(column.values()[1], Value::Missing);
        assert_eq!(resolution.rows_flagged, 0);
    }

    #[test]
    fn test_rerun_prefixes_again() {
        let mut column = phones(&[Some("555"), Some("555")]);
        flag_duplicates(&mut column, "RP-");
        flag_duplicates(&mut column, "RP-");

        assert_eq!(texts(&column), vec!["RP-RP-555", "RP-RP-555"]);
    }

    #[test]
    fn test_group_rows_by_key() {
        let column = phones(&[Some("a"), Some("b"), Some("a"), None]);
        let groups = group_rows_by_key(column.values());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["a"], vec![0, 2]);
        assert_eq!(groups["b"], vec![1]);
    }
}
