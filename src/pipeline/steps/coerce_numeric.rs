use metrics::counter;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::{PipelineStep, StepResult};
use crate::dataset::TableSet;
use crate::error::Result;
use crate::pipeline::processing::coerce_integer_column;
use crate::pipeline::rules::ColumnRef;

/// Pipeline step that fills missing values and converts columns to integers
pub struct CoerceNumericStep {
    defaults: BTreeMap<ColumnRef, i64>,
}

impl CoerceNumericStep {
    pub fn new(defaults: BTreeMap<ColumnRef, i64>) -> Self {
        Self { defaults }
    }
}

impl PipelineStep for CoerceNumericStep {
    fn step_name(&self) -> &'static str {
        "coerce_numeric"
    }

    fn execute(&self, tables: &mut TableSet) -> Result<StepResult> {
        info!("Converting numerical columns to integer...");
        let mut rows = 0;

        for (target, default) in &self.defaults {
            let table = tables.get_mut(target.dataset)?;
            let summary = coerce_integer_column(table, target.column, *default)?;
            debug!(
                "{}.{}: {} filled with {}, {} truncated",
                target.dataset, target.column, summary.filled, default, summary.truncated
            );
            counter!("shop_cleaner_rows_rewritten_total", "rule" => "numeric", "dataset" => target.dataset.key())
                .increment((summary.filled + summary.truncated) as u64);
            rows += table.row_count();
        }

        info!("✅ Numerical conversion completed");
        Ok(StepResult::success(
            self.step_name(),
            rows,
            format!("{} columns coerced to integer", self.defaults.len()),
        ))
    }
}
