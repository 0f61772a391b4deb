//! Failure taxonomy for the scoring pipeline.
//!
//! Every workflow stage fails with one of these kinds; nothing is retried and
//! no partial output survives an error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to deserialize artifact {}: {source}", .path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {} is inconsistent: {reason}", .path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("column {column:?} value {value:?} was not seen when the transformer was fitted")]
    UnknownCategory { column: &'static str, value: String },

    #[error("input table has no data rows")]
    EmptyTable,

    #[error("feature matrix has {got} columns but the model expects {expected}")]
    FeatureWidth { expected: usize, got: usize },

    #[error("feature column {position} is {got:?} but the model expects {expected:?}")]
    FeatureOrder {
        position: usize,
        expected: String,
        got: String,
    },

    #[error("decision tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: &'static str },

    #[error("{labels} predictions for {rows} rows")]
    LabelCount { rows: usize, labels: usize },
}
