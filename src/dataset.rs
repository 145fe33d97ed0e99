use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants;
use crate::error::{CleanerError, Result};
use crate::table::Table;

/// The eight datasets handled by the pipeline, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Customers,
    OrderItems,
    Orders,
    Payment,
    Products,
    Reviews,
    Shipments,
    Suppliers,
}

impl Dataset {
    pub const ALL: [Dataset; 8] = [
        Dataset::Customers,
        Dataset::OrderItems,
        Dataset::Orders,
        Dataset::Payment,
        Dataset::Products,
        Dataset::Reviews,
        Dataset::Shipments,
        Dataset::Suppliers,
    ];

    /// File name used both for the source and the cleaned copy
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Customers => constants::CUSTOMERS_FILE,
            Dataset::OrderItems => constants::ORDER_ITEMS_FILE,
            Dataset::Orders => constants::ORDERS_FILE,
            Dataset::Payment => constants::PAYMENT_FILE,
            Dataset::Products => constants::PRODUCTS_FILE,
            Dataset::Reviews => constants::REVIEWS_FILE,
            Dataset::Shipments => constants::SHIPMENTS_FILE,
            Dataset::Suppliers => constants::SUPPLIERS_FILE,
        }
    }

    /// Human-readable name used by the validation report
    pub fn display_name(&self) -> &'static str {
        match self {
            Dataset::Customers => "Customers",
            Dataset::OrderItems => "Order Items",
            Dataset::Orders => "Orders",
            Dataset::Payment => "Payment",
            Dataset::Products => "Products",
            Dataset::Reviews => "Reviews",
            Dataset::Shipments => "Shipments",
            Dataset::Suppliers => "Suppliers",
        }
    }

    /// Short identifier used in logs and metric labels
    pub fn key(&self) -> &'static str {
        self.file_name().trim_end_matches(".csv")
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// All tables of a single run, owned exclusively by that run
#[derive(Debug, Default, Clone)]
pub struct TableSet {
    tables: BTreeMap<Dataset, Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table, replacing any table previously loaded for the same dataset
    pub fn insert(&mut self, table: Table) -> Option<Table> {
        self.tables.insert(table.dataset(), table)
    }

    pub fn get(&self, dataset: Dataset) -> Result<&Table> {
        self.tables
            .get(&dataset)
            .ok_or(CleanerError::MissingTable(dataset))
    }

    pub fn get_mut(&mut self, dataset: Dataset) -> Result<&mut Table> {
        self.tables
            .get_mut(&dataset)
            .ok_or(CleanerError::MissingTable(dataset))
    }

    pub fn contains(&self, dataset: Dataset) -> bool {
        self.tables.contains_key(&dataset)
    }

    /// Tables in canonical dataset order
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_follow_dataset_keys() {
        assert_eq!(Dataset::OrderItems.file_name(), "order_items.csv");
        assert_eq!(Dataset::OrderItems.key(), "order_items");
        assert_eq!(Dataset::OrderItems.display_name(), "Order Items");
        assert_eq!(Dataset::Payment.to_string(), "payment");
    }

    #[test]
    fn test_table_set_iterates_in_canonical_order() {
        let mut set = TableSet::new();
        for dataset in [Dataset::Suppliers, Dataset::Customers, Dataset::Orders] {
            set.insert(Table::from_records(dataset, vec!["id".to_string()], Vec::new()).unwrap());
        }

        let order: Vec<Dataset> = set.iter().map(|t| t.dataset()).collect();
        assert_eq!(order, vec![Dataset::Customers, Dataset::Orders, Dataset::Suppliers]);
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let set = TableSet::new();
        let err = set.get(Dataset::Reviews).unwrap_err();
        assert!(matches!(err, CleanerError::MissingTable(Dataset::Reviews)));
    }
}
