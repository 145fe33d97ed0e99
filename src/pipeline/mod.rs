// Data cleaning pipeline: load, transform, validate and write

pub mod pipeline_config;
pub mod processing;
pub mod rules;
pub mod steps;

use chrono::{DateTime, Utc};
use metrics::histogram;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::dataset::TableSet;
use crate::error::Result;
use processing::summary::{summarize, TableSummary};
use steps::{
    CoerceNumericStep, LoadStep, ParseDatesStep, PipelineStep, ResolveDuplicatesStep, StepResult,
    ValidateStep, WriteStep,
};

pub use pipeline_config::{PipelinePlan, StepKind};
pub use rules::TransformRules;

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub plan: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepResult>,
    pub tables: Vec<TableSummary>,
}

impl RunReport {
    /// Persist the report as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json_content = serde_json::to_string_pretty(self)?;
        fs::write(path, json_content)?;
        Ok(())
    }
}

/// Runs a plan of named steps over a single in-memory table set
pub struct Pipeline {
    config: PipelineConfig,
    rules: TransformRules,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_rules(config, TransformRules::standard())
    }

    pub fn with_rules(config: PipelineConfig, rules: TransformRules) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn create_step(&self, kind: StepKind) -> Box<dyn PipelineStep> {
        match kind {
            StepKind::Load => Box::new(LoadStep::new(&self.config.source_dir)),
            StepKind::ResolveDuplicatePhones => {
                Box::new(ResolveDuplicatesStep::new(self.rules.duplicate_keys.clone()))
            }
            StepKind::CoerceNumeric => {
                Box::new(CoerceNumericStep::new(self.rules.numeric_defaults.clone()))
            }
            StepKind::ParseDates => Box::new(ParseDatesStep::new(self.rules.date_columns.clone())),
            StepKind::Validate => Box::new(ValidateStep),
            StepKind::Write => Box::new(WriteStep::new(&self.config.dest_dir)),
        }
    }

    /// Run `plan` from an empty table set
    pub fn run(&self, plan: &PipelinePlan) -> Result<RunReport> {
        let mut tables = TableSet::new();
        self.run_with_tables(plan, &mut tables)
    }

    /// Run `plan` over `tables`, stopping at the first failing step.
    /// Files written before a failure stay on disk.
    pub fn run_with_tables(&self, plan: &PipelinePlan, tables: &mut TableSet) -> Result<RunReport> {
        plan.validate()?;

        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline_run", run_id = %run_id, plan = %plan.name);
        let _enter = span.enter();

        let started_at = Utc::now();
        info!("🚀 Starting pipeline '{}': {}", plan.name, plan.description);

        let mut results = Vec::with_capacity(plan.steps.len());
        for (step_index, kind) in plan.steps.iter().enumerate() {
            let step = self.create_step(*kind);
            info!(
                "🔄 Executing step {}/{}: {}",
                step_index + 1,
                plan.steps.len(),
                step.step_name()
            );

            let t_step = std::time::Instant::now();
            let result = step.execute(tables).map_err(|e| {
                error!("❌ Step '{}' failed: {}", step.step_name(), e);
                e
            })?;
            histogram!("shop_cleaner_step_duration_seconds", "step" => step.step_name())
                .record(t_step.elapsed().as_secs_f64());

            info!("✅ Step '{}' completed: {}", step.step_name(), result.message);
            results.push(result);
        }

        Ok(RunReport {
            run_id,
            plan: plan.name.clone(),
            started_at,
            finished_at: Utc::now(),
            steps: results,
            tables: tables.iter().map(summarize).collect(),
        })
    }
}
