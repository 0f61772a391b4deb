//! SOW Criticality Pipeline Library
//!
//! Batch criticality scoring for statement-of-work records: a trained model
//! artifact plus a fitted feature transformer are loaded from disk, a CSV of
//! SOW records is transformed and scored, and the table comes back annotated
//! with a predicted criticality label per row.

pub mod config;
pub mod error;
pub mod feature_transformer;
pub mod metrics;
pub mod models;
pub mod table;
pub mod types;
pub mod workflow;

pub use config::AppConfig;
pub use error::PipelineError;
pub use feature_transformer::{FeatureMatrix, FeatureTransformer};
pub use metrics::RunMetrics;
pub use models::inference::InferenceEngine;
pub use models::loader::{ModelArtifact, ModelMetrics};
pub use table::SowTable;
pub use types::{criticality::CriticalityLabel, record::SowRecord};
pub use workflow::CriticalityWorkflow;
