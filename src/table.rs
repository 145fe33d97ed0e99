use chrono::{NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

use crate::constants::{MISSING_TOKENS, UNPARSEABLE_MARKER};
use crate::dataset::Dataset;
use crate::error::{CleanerError, Result};

static MISSING_TOKEN_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| MISSING_TOKENS.iter().copied().collect());

/// A single cell of a table
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Text(String),
    Integer(i64),
    Timestamp(NaiveDateTime),
    /// A date that failed to parse; distinct from `Missing`
    Unparseable,
}

impl Value {
    /// Interpret a raw CSV field
    pub fn from_field(field: &str) -> Self {
        if MISSING_TOKEN_SET.contains(field) {
            Value::Missing
        } else {
            Value::Text(field.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::Unparseable => f.write_str(UNPARSEABLE_MARKER),
        }
    }
}

/// A named column of values; its length is fixed once built
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Values for in-place rewriting
    pub fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every timestamp in the column falls exactly on midnight
    pub fn is_date_only(&self) -> bool {
        self.values.iter().all(|v| match v {
            Value::Timestamp(ts) => ts.time() == NaiveTime::MIN,
            _ => true,
        })
    }
}

/// In-memory tabular structure: named columns of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    dataset: Dataset,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from a header and row-oriented records
    pub fn from_records(dataset: Dataset, headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(CleanerError::MalformedSource {
                    dataset,
                    reason: format!(
                        "row {} has {} fields, expected {}",
                        i + 1,
                        row.len(),
                        columns.len()
                    ),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value);
            }
        }

        Ok(Self { dataset, columns })
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CleanerError::MissingColumn {
                dataset: self.dataset,
                column: name.to_string(),
            })
    }

    pub fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        let dataset = self.dataset;
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| CleanerError::MissingColumn {
                dataset,
                column: name.to_string(),
            })
    }

    /// Values of row `index` in column order
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }
}
