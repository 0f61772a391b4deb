//! Fitted feature transformation for SOW records.
//!
//! The transformer artifact carries the state fitted during training: ordinal
//! encoder tables for the categorical columns, standardization statistics,
//! and the feature column order the model was trained against. `transform`
//! reproduces that engineered representation for new records; fitting itself
//! happens upstream and is not part of this crate.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PipelineError;
use crate::models::loader::read_artifact;
use crate::table::SowTable;
use crate::types::record::SowRecord;

/// Engineered feature columns, in the order the model expects them.
pub const FEATURE_COLUMNS: [&str; 14] = [
    "days_to_expire",
    "is_expired",
    "is_critical_window",
    "is_high_priority_window",
    "has_workers",
    "worker_count",
    "worker_criticality_score",
    "budget_normalized",
    "budget_per_worker",
    "risk_score",
    "supplier_encoded",
    "business_unit_encoded",
    "primary_lob_encoded",
    "currency_encoded",
];

/// Row-major feature matrix plus the column names it was built against.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<f32>>,
}

impl FeatureMatrix {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f32>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Per-column standardization statistics fitted during training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl StandardScaler {
    /// Standardize one value. A zero-variance column scales by 1, matching
    /// the fitting library's behavior.
    fn apply(&self, index: usize, value: f64) -> f64 {
        let std = self.stds[index];
        let scale = if std.abs() < f64::EPSILON { 1.0 } else { std };
        (value - self.means[index]) / scale
    }
}

/// Category → ordinal tables for the encoded columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderTables {
    pub supplier: HashMap<String, usize>,
    pub business_unit: HashMap<String, usize>,
    pub primary_lob: HashMap<String, usize>,
    pub currency: HashMap<String, usize>,
}

impl EncoderTables {
    fn encode(
        table: &HashMap<String, usize>,
        column: &'static str,
        value: &str,
    ) -> Result<f64, PipelineError> {
        table
            .get(value)
            .map(|ordinal| *ordinal as f64)
            .ok_or_else(|| PipelineError::UnknownCategory {
                column,
                value: value.to_string(),
            })
    }
}

/// The fitted feature-engineering object, loaded from its JSON artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureTransformer {
    /// When the transformer was fitted
    pub fitted_at: DateTime<Utc>,
    /// Feature column order the downstream model expects
    pub feature_columns: Vec<String>,
    /// Fitted categorical encoder tables
    pub encoders: EncoderTables,
    /// Fitted standardization statistics, aligned with `feature_columns`
    pub scaler: StandardScaler,
}

impl FeatureTransformer {
    /// Load and validate a fitted transformer artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let transformer: FeatureTransformer = read_artifact(path)?;
        transformer.validate(path)?;

        info!(
            path = %path.display(),
            features = transformer.feature_columns.len(),
            fitted_at = %transformer.fitted_at,
            "Feature transformer loaded"
        );
        Ok(transformer)
    }

    fn validate(&self, path: &Path) -> Result<(), PipelineError> {
        if self.feature_columns != FEATURE_COLUMNS {
            return Err(PipelineError::InvalidArtifact {
                path: path.to_path_buf(),
                reason: format!(
                    "transformer was fitted for columns {:?}, this pipeline produces {:?}",
                    self.feature_columns, FEATURE_COLUMNS
                ),
            });
        }
        if self.scaler.means.len() != self.feature_columns.len()
            || self.scaler.stds.len() != self.feature_columns.len()
        {
            return Err(PipelineError::InvalidArtifact {
                path: path.to_path_buf(),
                reason: format!(
                    "scaler has {} means / {} stds for {} columns",
                    self.scaler.means.len(),
                    self.scaler.stds.len(),
                    self.feature_columns.len()
                ),
            });
        }
        Ok(())
    }

    /// Number of features produced per record.
    pub fn feature_count(&self) -> usize {
        self.feature_columns.len()
    }

    /// Transform a loaded table into the standardized feature matrix.
    pub fn transform(&self, table: &SowTable) -> Result<FeatureMatrix, PipelineError> {
        let mut rows = Vec::with_capacity(table.len());
        for record in table.records() {
            let raw = self.raw_features(record)?;
            let scaled = raw
                .iter()
                .enumerate()
                .map(|(i, &value)| self.scaler.apply(i, value) as f32)
                .collect();
            rows.push(scaled);
        }

        Ok(FeatureMatrix {
            columns: self.feature_columns.clone(),
            rows,
        })
    }

    /// Engineered features for one record, before standardization.
    fn raw_features(&self, record: &SowRecord) -> Result<[f64; 14], PipelineError> {
        let days = record.days_before_expiration as f64;
        let workers = record.active_sow_workers as f64;
        let budget = record.latest_maximum_budget;

        let is_expired = if record.days_before_expiration < 0 { 1.0 } else { 0.0 };
        let is_critical_window = if record.days_before_expiration <= 30 {
            1.0
        } else {
            0.0
        };
        let is_high_priority_window =
            if record.days_before_expiration > 30 && record.days_before_expiration <= 60 {
                1.0
            } else {
                0.0
            };
        let has_workers = if record.active_sow_workers > 0 { 1.0 } else { 0.0 };

        let worker_criticality_score = workers * is_critical_window;
        let budget_normalized = budget / 1_000_000.0;
        let budget_per_worker = if record.active_sow_workers > 0 {
            budget / workers
        } else {
            0.0
        };
        let risk_score = (30.0 - days) * has_workers * (1.0 + workers.ln_1p());

        Ok([
            days,
            is_expired,
            is_critical_window,
            is_high_priority_window,
            has_workers,
            workers,
            worker_criticality_score,
            budget_normalized,
            budget_per_worker,
            risk_score,
            EncoderTables::encode(&self.encoders.supplier, "supplier", &record.supplier)?,
            EncoderTables::encode(
                &self.encoders.business_unit,
                "Business Unit",
                &record.business_unit,
            )?,
            EncoderTables::encode(
                &self.encoders.primary_lob,
                "Primary LOB",
                &record.primary_lob,
            )?,
            EncoderTables::encode(&self.encoders.currency, "currency", &record.currency)?,
        ])
    }
}
