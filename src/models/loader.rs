//! Model artifact loading

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PipelineError;
use crate::models::forest::DecisionTree;
use crate::types::criticality::CriticalityLabel;

/// Read and deserialize a JSON artifact, with an existence check up front so
/// a missing path reports NotFound rather than a bare I/O error.
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|source| PipelineError::Deserialization {
        path: path.to_path_buf(),
        source,
    })
}

/// Evaluation metrics captured when the model was trained. Bundled inside the
/// model artifact and also exported as a `<stem>_metrics.json` side document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
}

impl ModelMetrics {
    /// Load the side document written next to a model artifact.
    ///
    /// The scoring workflow never consumes this; it exists for reporting.
    pub fn load_sidecar<P: AsRef<Path>>(model_path: P) -> Result<Self, PipelineError> {
        let model_path = model_path.as_ref();
        let stem = model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("model");
        let sidecar = model_path.with_file_name(format!("{stem}_metrics.json"));
        read_artifact(&sidecar)
    }
}

/// A trained criticality model as stored on disk: the fitted tree ensemble
/// plus the metadata packaged with it at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Kind of model the trainer fitted (e.g. "random_forest")
    pub model_type: String,
    /// When training finished
    pub training_date: DateTime<Utc>,
    /// Feature columns the model expects, in order
    pub feature_names: Vec<String>,
    /// Label for each leaf class index
    pub classes: Vec<CriticalityLabel>,
    /// Held-out evaluation metrics
    pub metrics: ModelMetrics,
    /// The fitted ensemble
    pub trees: Vec<DecisionTree>,
}

impl ModelArtifact {
    /// Load and validate a model artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let artifact: ModelArtifact = read_artifact(path)?;
        artifact.validate(path)?;

        info!(
            path = %path.display(),
            model_type = %artifact.model_type,
            trees = artifact.trees.len(),
            features = artifact.feature_names.len(),
            trained = %artifact.training_date,
            test_accuracy = artifact.metrics.test_accuracy,
            "Model loaded"
        );
        Ok(artifact)
    }

    fn validate(&self, path: &Path) -> Result<(), PipelineError> {
        let invalid = |reason: String| PipelineError::InvalidArtifact {
            path: path.to_path_buf(),
            reason,
        };

        if self.feature_names.is_empty() {
            return Err(invalid("no feature names".to_string()));
        }
        if self.classes.is_empty() {
            return Err(invalid("no classes".to_string()));
        }
        if self.trees.is_empty() {
            return Err(invalid("no trees in the ensemble".to_string()));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.check(self.feature_names.len(), self.classes.len())
                .map_err(|reason| invalid(format!("tree {index}: {reason}")))?;
        }
        Ok(())
    }

    /// Number of features the model was trained on.
    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forest::TreeNode;
    use std::io::Write;

    fn minimal_artifact() -> ModelArtifact {
        ModelArtifact {
            model_type: "random_forest".to_string(),
            training_date: Utc::now(),
            feature_names: vec!["days_to_expire".to_string(), "worker_count".to_string()],
            classes: vec![
                CriticalityLabel::Bajo,
                CriticalityLabel::Medio,
                CriticalityLabel::Alto,
                CriticalityLabel::Critico,
            ],
            metrics: ModelMetrics {
                train_accuracy: 0.99,
                test_accuracy: 0.96,
                train_size: 120,
                test_size: 30,
            },
            trees: vec![DecisionTree {
                nodes: vec![TreeNode::Leaf { class: 0 }],
            }],
        }
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("criticality_model.json");
        std::fs::write(&path, serde_json::to_vec(&minimal_artifact()).unwrap()).unwrap();

        let loaded = ModelArtifact::load(&path).unwrap();
        assert_eq!(loaded.model_type, "random_forest");
        assert_eq!(loaded.feature_count(), 2);
        assert_eq!(loaded.classes.len(), 4);
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifact::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }

    #[test]
    fn test_corrupt_artifact_is_a_deserialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("criticality_model.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Deserialization { .. }));
    }

    #[test]
    fn test_inconsistent_artifact_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("criticality_model.json");

        let mut artifact = minimal_artifact();
        artifact.trees[0].nodes[0] = TreeNode::Leaf { class: 9 };
        std::fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArtifact { .. }));
    }

    #[test]
    fn test_metrics_sidecar_naming() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("criticality_model.json");
        let metrics = minimal_artifact().metrics;
        std::fs::write(
            dir.path().join("criticality_model_metrics.json"),
            serde_json::to_vec(&metrics).unwrap(),
        )
        .unwrap();

        let loaded = ModelMetrics::load_sidecar(&model_path).unwrap();
        assert_eq!(loaded, metrics);
    }
}
