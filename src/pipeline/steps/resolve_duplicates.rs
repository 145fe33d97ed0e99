use metrics::counter;
use tracing::{info, warn};

use super::{PipelineStep, StepResult};
use crate::dataset::TableSet;
use crate::error::Result;
use crate::pipeline::processing::flag_duplicates;
use crate::pipeline::rules::DuplicateRule;

/// Pipeline step that marks every member of a duplicate key group
pub struct ResolveDuplicatesStep {
    rules: Vec<DuplicateRule>,
}

impl ResolveDuplicatesStep {
    pub fn new(rules: Vec<DuplicateRule>) -> Self {
        Self { rules }
    }
}

impl PipelineStep for ResolveDuplicatesStep {
    fn step_name(&self) -> &'static str {
        "resolve_duplicate_phones"
    }

    fn execute(&self, tables: &mut TableSet) -> Result<StepResult> {
        let mut flagged = 0;

        for rule in &self.rules {
            let target = rule.target;
            info!("Checking for duplicate {} in {}...", target.column, target.dataset);

            let column = tables.get_mut(target.dataset)?.column_mut(target.column)?;
            let resolution = flag_duplicates(column, rule.prefix);

            if resolution.rows_flagged > 0 {
                warn!(
                    "Found {} duplicate {} groups in {}; {} rows prefixed with '{}'",
                    resolution.groups, target.column, target.dataset, resolution.rows_flagged, rule.prefix
                );
            } else {
                info!("No duplicate {} found in {}", target.column, target.dataset);
            }

            counter!("shop_cleaner_rows_rewritten_total", "rule" => "duplicate_key", "dataset" => target.dataset.key())
                .increment(resolution.rows_flagged as u64);
            flagged += resolution.rows_flagged;
        }

        Ok(StepResult::success(
            self.step_name(),
            flagged,
            format!("{} rows flagged as duplicates", flagged),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::pipeline::rules::TransformRules;
    use crate::table::{Table, Value};

    fn customers(phones: &[&str]) -> TableSet {
        let rows = phones
            .iter()
            .enumerate()
            .map(|(i, p)| vec![Value::Text((i + 1).to_string()), Value::Text(p.to_string())])
            .collect();
        let mut set = TableSet::new();
        set.insert(
            Table::from_records(
                Dataset::Customers,
                vec!["customer_id".to_string(), "phone_number".to_string()],
                rows,
            )
            .unwrap(),
        );
        set
    }

    #[test]
    fn test_customer_phone_scenario() {
        let mut tables = customers(&["555-1111", "555-1111", "555-2222"]);
        let step = ResolveDuplicatesStep::new(TransformRules::standard().duplicate_keys);

        let result = step.execute(&mut tables).unwrap();

        let phones: Vec<String> = tables
            .get(Dataset::Customers)
            .unwrap()
            .column("phone_number")
            .unwrap()
            .values()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(phones, vec!["RP-555-1111", "RP-555-1111", "555-2222"]);
        assert_eq!(result.processed_count, 2);
    }

    #[test]
    fn test_missing_customers_table_is_fatal() {
        let mut tables = TableSet::new();
        let step = ResolveDuplicatesStep::new(TransformRules::standard().duplicate_keys);
        assert!(step.execute(&mut tables).is_err());
    }
}
