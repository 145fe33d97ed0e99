pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod infra;
pub mod logging;
pub mod pipeline;
pub mod table;

pub use config::PipelineConfig;
pub use dataset::{Dataset, TableSet};
pub use error::{CleanerError, Result};
pub use pipeline::{Pipeline, PipelinePlan, RunReport};
pub use table::{Column, Table, Value};
