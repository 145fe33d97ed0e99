use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use crate::dataset::Dataset;
use crate::table::{Column, Table, Value};

/// Display type of a column, named after the pandas dtypes analysts expect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int64,
    Float64,
    Datetime64,
    Object,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Datetime64 => "datetime64",
            ColumnType::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub non_null: usize,
    pub unparseable: usize,
    pub dtype: ColumnType,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub dataset: Dataset,
    pub name: String,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Int,
    Float,
    Date,
    Text,
}

fn classify(value: &Value) -> Option<Kind> {
    match value {
        Value::Missing => None,
        Value::Integer(_) => Some(Kind::Int),
        Value::Timestamp(_) | Value::Unparseable => Some(Kind::Date),
        Value::Text(s) => {
            let s = s.trim();
            if s.parse::<i64>().is_ok() {
                Some(Kind::Int)
            } else if s.parse::<f64>().is_ok() {
                Some(Kind::Float)
            } else {
                Some(Kind::Text)
            }
        }
    }
}

/// Infer a column's display type. Integers mixed with missing values
/// read as float64, and an all-missing column is float64, as in pandas.
pub fn infer_column_type(column: &Column) -> ColumnType {
    let mut has_missing = false;
    let mut kinds = Vec::with_capacity(4);

    for value in column.values() {
        match classify(value) {
            None => has_missing = true,
            Some(kind) => {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
    }

    let only = |allowed: &[Kind]| kinds.iter().all(|k| allowed.contains(k));

    if kinds.is_empty() {
        ColumnType::Float64
    } else if only(&[Kind::Date]) {
        ColumnType::Datetime64
    } else if only(&[Kind::Int]) && !has_missing {
        ColumnType::Int64
    } else if only(&[Kind::Int, Kind::Float]) {
        ColumnType::Float64
    } else {
        ColumnType::Object
    }
}

pub fn summarize(table: &Table) -> TableSummary {
    let columns = table
        .columns()
        .iter()
        .map(|column| ColumnSummary {
            name: column.name.clone(),
            non_null: column
                .values()
                .iter()
                .filter(|v| !matches!(v, Value::Missing | Value::Unparseable))
                .count(),
            unparseable: column
                .values()
                .iter()
                .filter(|v| matches!(v, Value::Unparseable))
                .count(),
            dtype: infer_column_type(column),
        })
        .collect();

    TableSummary {
        dataset: table.dataset(),
        name: table.dataset().display_name().to_string(),
        rows: table.row_count(),
        columns,
    }
}

/// Render a summary in a layout close to `DataFrame.info()`
pub fn render(summary: &TableSummary) -> String {
    let mut out = String::new();
    let name_width = summary
        .columns
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        .max("Column".len());

    let _ = writeln!(out, "{} Dataset:", summary.name);
    let _ = writeln!(out, "Entries: {}", summary.rows);
    let _ = writeln!(out, "Data columns (total {} columns):", summary.columns.len());
    let _ = writeln!(
        out,
        " {:<3} {:<width$}  {:<14}  {:<11}  {}",
        "#",
        "Column",
        "Non-Null Count",
        "Unparseable",
        "Dtype",
        width = name_width
    );
    let _ = writeln!(
        out,
        " {:<3} {:<width$}  {:<14}  {:<11}  {}",
        "---",
        "------",
        "--------------",
        "-----------",
        "-----",
        width = name_width
    );

    let mut dtype_counts: BTreeMap<ColumnType, usize> = BTreeMap::new();
    for (i, column) in summary.columns.iter().enumerate() {
        *dtype_counts.entry(column.dtype).or_default() += 1;
        let _ = writeln!(
            out,
            " {:<3} {:<width$}  {:<14}  {:<11}  {}",
            i,
            column.name,
            format!("{} non-null", column.non_null),
            column.unparseable,
            column.dtype,
            width = name_width
        );
    }

    let dtypes: Vec<String> = dtype_counts
        .iter()
        .map(|(dtype, count)| format!("{}({})", dtype, count))
        .collect();
    let _ = writeln!(out, "dtypes: {}", dtypes.join(", "));

    out
}
