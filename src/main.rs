use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use shop_cleaner::config::{AppConfig, ConfigFile, Overrides};
use shop_cleaner::logging;
use shop_cleaner::pipeline::StepKind;
use shop_cleaner::{Pipeline, PipelinePlan, RunReport};

#[derive(Parser)]
#[command(name = "shop_cleaner")]
#[command(about = "Clean the online shop datasets for reporting")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Directory holding the eight source CSV files
    #[arg(long)]
    source_dir: Option<PathBuf>,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, clean, validate and export all datasets
    Run {
        #[command(flatten)]
        source: SourceArgs,
        /// Directory the cleaned CSV files are written to
        #[arg(long)]
        dest_dir: Option<PathBuf>,
        /// Also write the run report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Load, clean and validate without writing anything
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn resolve_config(source: &SourceArgs, dest_dir: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let file = match &source.config {
        Some(path) => Some(
            ConfigFile::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
        ),
        None => None,
    };

    let overrides = Overrides {
        source_dir: source.source_dir.clone(),
        dest_dir,
    };

    Ok(AppConfig::resolve(file, overrides))
}

fn print_summary(report: &RunReport) {
    println!("\n📊 Pipeline Results ({}):", report.plan);
    for step in &report.steps {
        println!("   {}: {}", step.step, step.message);
    }
    for artifact in report.steps.iter().flat_map(|s| &s.artifacts) {
        println!("   Output file: {}", artifact.display());
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, plan, report_path) = match cli.command {
        Commands::Run {
            source,
            dest_dir,
            report,
        } => (resolve_config(&source, dest_dir)?, PipelinePlan::full(), report),
        Commands::Check { source } => (resolve_config(&source, None)?, PipelinePlan::dry_run(), None),
    };

    let _guard = logging::init_logging(&config.log_dir)
        .with_context(|| format!("Failed to set up logging in {}", config.log_dir.display()))?;
    info!(
        "Source: {}, destination: {}",
        config.pipeline.source_dir.display(),
        config.pipeline.dest_dir.display()
    );

    let pipeline = Pipeline::new(config.pipeline);
    let report = match pipeline.run(&plan) {
        Ok(report) => report,
        Err(e) => {
            error!("Pipeline run failed: {}", e);
            println!("❌ Pipeline run failed: {}", e);
            return Err(e).context("Cleaning pipeline aborted");
        }
    };

    print_summary(&report);

    if let Some(path) = report_path {
        report
            .write_json(&path)
            .with_context(|| format!("Failed to write run report {}", path.display()))?;
        info!("💾 Saved run report to {}", path.display());
    }

    if plan.steps.contains(&StepKind::Write) {
        println!("\n✅ Data Cleaning & Export Completed Successfully!");
    } else {
        println!("\n✅ Data check completed, nothing written");
    }

    Ok(())
}
