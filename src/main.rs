//! SOW Criticality Pipeline - Main Entry Point
//!
//! Loads the trained model and feature transformer, scores a CSV of SOW
//! records, and displays the annotated table with a run summary.

use anyhow::{Context, Result};
use sow_criticality_pipeline::{config::AppConfig, workflow::CriticalityWorkflow};
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sow_criticality_pipeline=info".parse()?),
        )
        .init();

    info!("Starting SOW Criticality Pipeline");

    // Load configuration (optional positional override of the config path)
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_path(&path)
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        None => AppConfig::load()?,
    };
    info!(
        model = %config.artifacts.model_path.display(),
        transformer = %config.artifacts.transformer_path.display(),
        input = %config.data.input_path.display(),
        "Configuration loaded"
    );

    // Load artifacts and score the input table
    let workflow =
        CriticalityWorkflow::from_config(&config).context("Failed to load artifacts")?;
    let output = workflow
        .run(&config.data.input_path)
        .context("Scoring run failed")?;

    // Display a preview of the annotated table
    println!();
    println!("{}", output.table.preview(config.display.preview_rows));

    output.metrics.print_summary();

    Ok(())
}
