use std::collections::BTreeMap;

use crate::constants::*;
use crate::dataset::Dataset;

/// A single column of a single dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ColumnRef {
    pub dataset: Dataset,
    pub column: &'static str,
}

impl ColumnRef {
    pub const fn new(dataset: Dataset, column: &'static str) -> Self {
        Self { dataset, column }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateRule {
    pub target: ColumnRef,
    pub prefix: &'static str,
}

/// The fixed cleaning policy. Each rule touches exactly one column of one table.
#[derive(Debug, Clone)]
pub struct TransformRules {
    /// Key columns whose duplicate groups get a marker prefix
    pub duplicate_keys: Vec<DuplicateRule>,
    /// Integer columns and the value their missing entries become
    pub numeric_defaults: BTreeMap<ColumnRef, i64>,
    /// Columns parsed as calendar dates
    pub date_columns: Vec<ColumnRef>,
}

impl TransformRules {
    pub fn standard() -> Self {
        let numeric_defaults = [
            (ColumnRef::new(Dataset::OrderItems, PRICE_AT_PURCHASE_COLUMN), 0),
            (ColumnRef::new(Dataset::Orders, TOTAL_PRICE_COLUMN), 0),
            (ColumnRef::new(Dataset::Payment, AMOUNT_COLUMN), 0),
            (ColumnRef::new(Dataset::Products, PRICE_COLUMN), 0),
        ]
        .into_iter()
        .collect();

        Self {
            duplicate_keys: vec![DuplicateRule {
                target: ColumnRef::new(Dataset::Customers, PHONE_NUMBER_COLUMN),
                prefix: DUPLICATE_PHONE_PREFIX,
            }],
            numeric_defaults,
            date_columns: vec![
                ColumnRef::new(Dataset::Orders, ORDER_DATE_COLUMN),
                ColumnRef::new(Dataset::Shipments, DELIVERY_DATE_COLUMN),
                ColumnRef::new(Dataset::Shipments, SHIPMENT_DATE_COLUMN),
            ],
        }
    }

    pub fn default_for(&self, dataset: Dataset, column: &str) -> Option<i64> {
        self.numeric_defaults
            .iter()
            .find(|(target, _)| target.dataset == dataset && target.column == column)
            .map(|(_, default)| *default)
    }
}

impl Default for TransformRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_table() {
        let rules = TransformRules::standard();

        assert_eq!(rules.numeric_defaults.len(), 4);
        assert_eq!(rules.default_for(Dataset::Payment, "amount"), Some(0));
        assert_eq!(rules.default_for(Dataset::Payment, "payment_id"), None);
        assert_eq!(rules.default_for(Dataset::Reviews, "rating"), None);

        assert_eq!(rules.duplicate_keys[0].target.column, "phone_number");
        assert_eq!(rules.duplicate_keys[0].prefix, "RP-");
        assert_eq!(rules.date_columns.len(), 3);
    }

    #[test]
    fn test_pass_through_datasets_have_no_rules() {
        let rules = TransformRules::standard();
        let touched: Vec<Dataset> = rules
            .duplicate_keys
            .iter()
            .map(|r| r.target.dataset)
            .chain(rules.numeric_defaults.keys().map(|c| c.dataset))
            .chain(rules.date_columns.iter().map(|c| c.dataset))
            .collect();

        assert!(!touched.contains(&Dataset::Reviews));
        assert!(!touched.contains(&Dataset::Suppliers));
    }
}
