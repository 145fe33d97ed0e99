use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CleanerError, Result};

/// Configuration for a complete pipeline execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelinePlan {
    pub name: String,
    pub description: String,
    pub steps: Vec<StepKind>,
}

/// The steps a plan can be assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Load,
    ResolveDuplicatePhones,
    CoerceNumeric,
    ParseDates,
    Validate,
    Write,
}

impl PipelinePlan {
    /// Load, clean, report and write every dataset
    pub fn full() -> Self {
        Self {
            name: "full".to_string(),
            description: "Load, clean, validate and export all datasets".to_string(),
            steps: vec![
                StepKind::Load,
                StepKind::ResolveDuplicatePhones,
                StepKind::CoerceNumeric,
                StepKind::ParseDates,
                StepKind::Validate,
                StepKind::Write,
            ],
        }
    }

    /// Everything except the export; nothing touches the destination
    pub fn dry_run() -> Self {
        let mut plan = Self::full();
        plan.name = "dry_run".to_string();
        plan.description = "Load, clean and validate without exporting".to_string();
        plan.steps.retain(|step| *step != StepKind::Write);
        plan
    }

    /// Validate the pipeline plan
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(CleanerError::InvalidPlan(
                "Pipeline must have at least one step".to_string(),
            ));
        }

        let mut seen_steps = HashSet::new();
        for step in &self.steps {
            for dep in step.dependencies() {
                if !seen_steps.contains(dep) {
                    return Err(CleanerError::InvalidPlan(format!(
                        "Step '{}' depends on '{}' which does not run before it",
                        step.step_name(),
                        dep
                    )));
                }
            }
            seen_steps.insert(step.step_name());
        }

        Ok(())
    }
}

impl StepKind {
    pub fn step_name(&self) -> &'static str {
        match self {
            StepKind::Load => "load",
            StepKind::ResolveDuplicatePhones => "resolve_duplicate_phones",
            StepKind::CoerceNumeric => "coerce_numeric",
            StepKind::ParseDates => "parse_dates",
            StepKind::Validate => "validate",
            StepKind::Write => "write",
        }
    }

    /// Steps that must appear earlier in the same plan
    pub fn dependencies(&self) -> Vec<&'static str> {
        match self {
            StepKind::Load => vec![],
            _ => vec!["load"],
        }
    }
}
