//! The sequential scoring workflow.
//!
//! One invocation is all-or-nothing: load table → transform → predict →
//! annotate, with any stage error propagating untouched to the caller.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::config::AppConfig;
use crate::error::PipelineError;
use crate::feature_transformer::FeatureTransformer;
use crate::metrics::RunMetrics;
use crate::models::inference::InferenceEngine;
use crate::table::SowTable;

/// The annotated table and the run statistics that produced it.
#[derive(Debug)]
pub struct WorkflowOutput {
    pub table: SowTable,
    pub metrics: RunMetrics,
}

/// Criticality scoring workflow over a loaded model and transformer pair.
#[derive(Debug)]
pub struct CriticalityWorkflow {
    transformer: FeatureTransformer,
    engine: InferenceEngine,
}

impl CriticalityWorkflow {
    /// Load both artifacts from their configured paths.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        let engine = InferenceEngine::from_path(&config.artifacts.model_path)?;
        let transformer = FeatureTransformer::load(&config.artifacts.transformer_path)?;
        Ok(Self::new(transformer, engine))
    }

    pub fn new(transformer: FeatureTransformer, engine: InferenceEngine) -> Self {
        Self {
            transformer,
            engine,
        }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Score the CSV at `input`: one predicted label per row, attached to the
    /// returned table. No partial output survives a failure.
    pub fn run<P: AsRef<Path>>(&self, input: P) -> Result<WorkflowOutput, PipelineError> {
        let mut metrics = RunMetrics::new();

        let start = Instant::now();
        let mut table = SowTable::load(input)?;
        metrics.record_load_table(start.elapsed());

        let start = Instant::now();
        let matrix = self.transformer.transform(&table)?;
        metrics.record_transform(start.elapsed());
        info!(
            rows = matrix.n_rows(),
            features = matrix.width(),
            "Feature matrix built"
        );

        let start = Instant::now();
        let labels = self.engine.predict(&matrix)?;
        metrics.record_predict(start.elapsed());

        table.annotate(&labels)?;
        metrics.record_labels(&labels);
        metrics.finish();

        info!(rows = table.len(), "Scoring run complete");
        Ok(WorkflowOutput { table, metrics })
    }
}
