use metrics::counter;
use tracing::{info, warn};

use super::{PipelineStep, StepResult};
use crate::dataset::TableSet;
use crate::error::Result;
use crate::pipeline::processing::parse_date_column;
use crate::pipeline::rules::ColumnRef;

/// Pipeline step that parses date columns, marking failures instead of erroring
pub struct ParseDatesStep {
    columns: Vec<ColumnRef>,
}

impl ParseDatesStep {
    pub fn new(columns: Vec<ColumnRef>) -> Self {
        Self { columns }
    }
}

impl PipelineStep for ParseDatesStep {
    fn step_name(&self) -> &'static str {
        "parse_dates"
    }

    fn execute(&self, tables: &mut TableSet) -> Result<StepResult> {
        info!("Converting date columns...");
        let mut parsed = 0;

        for target in &self.columns {
            let table = tables.get_mut(target.dataset)?;
            let summary = parse_date_column(table, target.column)?;
            if summary.unparseable > 0 {
                warn!(
                    "{}.{}: {} values could not be parsed as dates",
                    target.dataset, target.column, summary.unparseable
                );
            }
            counter!("shop_cleaner_unparseable_dates_total", "dataset" => target.dataset.key())
                .increment(summary.unparseable as u64);
            parsed += summary.parsed;
        }

        info!("✅ Date conversion completed");
        Ok(StepResult::success(
            self.step_name(),
            parsed,
            format!("{} values parsed across {} date columns", parsed, self.columns.len()),
        ))
    }
}
