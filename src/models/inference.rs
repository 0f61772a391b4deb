//! Inference engine: scoring feature matrices with a loaded model.

use std::path::Path;

use tracing::debug;

use crate::error::PipelineError;
use crate::feature_transformer::FeatureMatrix;
use crate::models::loader::ModelArtifact;
use crate::types::criticality::CriticalityLabel;

/// Runs a loaded tree ensemble over feature matrices.
#[derive(Debug)]
pub struct InferenceEngine {
    model: ModelArtifact,
}

impl InferenceEngine {
    /// Wrap an already-loaded model artifact.
    pub fn new(model: ModelArtifact) -> Self {
        Self { model }
    }

    /// Load the model artifact at `path` and build an engine around it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        Ok(Self::new(ModelArtifact::load(path)?))
    }

    pub fn model(&self) -> &ModelArtifact {
        &self.model
    }

    /// Predict one label per matrix row.
    ///
    /// The matrix must carry exactly the model's feature columns, in the
    /// model's order; anything else is a shape rejection, not a silent
    /// reorder.
    pub fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<CriticalityLabel>, PipelineError> {
        self.validate_columns(matrix)?;

        let mut labels = Vec::with_capacity(matrix.n_rows());
        for row in matrix.rows() {
            labels.push(self.predict_row(row)?);
        }

        debug!(
            rows = matrix.n_rows(),
            trees = self.model.trees.len(),
            "Batch inference complete"
        );
        Ok(labels)
    }

    /// Predict a single feature row.
    pub fn predict_one(&self, row: &[f32]) -> Result<CriticalityLabel, PipelineError> {
        if row.len() != self.model.feature_count() {
            return Err(PipelineError::FeatureWidth {
                expected: self.model.feature_count(),
                got: row.len(),
            });
        }
        self.predict_row(row)
    }

    /// Majority vote across the ensemble; ties go to the most severe label.
    fn predict_row(&self, row: &[f32]) -> Result<CriticalityLabel, PipelineError> {
        let mut votes = vec![0usize; self.model.classes.len()];
        for (index, tree) in self.model.trees.iter().enumerate() {
            let class = tree.predict_class(index, row)?;
            votes[class] += 1;
        }

        let winner = self
            .model
            .classes
            .iter()
            .zip(&votes)
            .max_by_key(|(label, count)| (**count, label.severity()))
            .map(|(label, _)| *label)
            .unwrap_or(CriticalityLabel::Bajo);
        Ok(winner)
    }

    fn validate_columns(&self, matrix: &FeatureMatrix) -> Result<(), PipelineError> {
        if matrix.width() != self.model.feature_count() {
            return Err(PipelineError::FeatureWidth {
                expected: self.model.feature_count(),
                got: matrix.width(),
            });
        }
        for (position, (got, expected)) in matrix
            .columns()
            .iter()
            .zip(&self.model.feature_names)
            .enumerate()
        {
            if got != expected {
                return Err(PipelineError::FeatureOrder {
                    position,
                    expected: expected.clone(),
                    got: got.clone(),
                });
            }
        }
        Ok(())
    }
}
