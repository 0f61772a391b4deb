//! Model artifact handling and inference

pub mod forest;
pub mod inference;
pub mod loader;

pub use forest::{DecisionTree, TreeNode};
pub use inference::InferenceEngine;
pub use loader::{ModelArtifact, ModelMetrics};
