//! SOW record data structures for criticality scoring

use serde::{Deserialize, Serialize};

use crate::types::criticality::CriticalityLabel;

/// A single statement-of-work record as exported from Fieldglass.
///
/// Field names are renamed to the exact CSV header names of the export, so
/// the same struct reads the raw file and writes synthetic datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SowRecord {
    /// Unique SOW identifier
    #[serde(rename = "SOW ID")]
    pub sow_id: String,

    /// Days until the contract expires (negative when already expired)
    #[serde(rename = "# Days before expiration")]
    pub days_before_expiration: i64,

    /// Contract status (Active, Pending Renewal, Expired, ...)
    #[serde(rename = "SOW Status")]
    pub sow_status: String,

    /// Human-readable title
    #[serde(rename = "SOW title")]
    pub sow_title: String,

    /// Parent contract identifier
    #[serde(rename = "Contract Id")]
    pub contract_id: String,

    /// Number of workers currently billing against the SOW
    #[serde(rename = "Active SOW workers")]
    pub active_sow_workers: i64,

    /// Contract start date (ISO-8601 date string as exported)
    #[serde(rename = "Start Date")]
    pub start_date: String,

    /// Contract end date
    #[serde(rename = "End date")]
    pub end_date: String,

    /// Latest approved maximum budget
    #[serde(rename = "Latest maximum budget")]
    pub latest_maximum_budget: f64,

    /// Budget currency code
    #[serde(rename = "currency")]
    pub currency: String,

    /// Supplier name
    #[serde(rename = "supplier")]
    pub supplier: String,

    /// Owning business unit
    #[serde(rename = "Business Unit")]
    pub business_unit: String,

    /// Primary line of business
    #[serde(rename = "Primary LOB")]
    pub primary_lob: String,

    /// Responsible owner
    #[serde(rename = "SOW owner")]
    pub sow_owner: String,

    /// Label attached by the scoring workflow. Absent in raw exports; the
    /// only field annotation is allowed to touch.
    #[serde(
        rename = "Predicted Criticality",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub predicted_criticality: Option<CriticalityLabel>,
}

impl SowRecord {
    /// Create a record with required scoring fields, defaulting the rest.
    pub fn new(sow_id: &str, days_before_expiration: i64, active_sow_workers: i64) -> Self {
        Self {
            sow_id: sow_id.to_string(),
            days_before_expiration,
            sow_status: "Active".to_string(),
            sow_title: "Software Development Services".to_string(),
            contract_id: format!("CNT-{}", sow_id),
            active_sow_workers,
            start_date: "2025-01-01".to_string(),
            end_date: "2025-12-31".to_string(),
            latest_maximum_budget: 250_000.0,
            currency: "USD".to_string(),
            supplier: "Accenture".to_string(),
            business_unit: "Technology".to_string(),
            primary_lob: "Application Development".to_string(),
            sow_owner: "Sarah Chen".to_string(),
            predicted_criticality: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization_roundtrip() {
        let record = SowRecord::new("SOW-2024-0001", 28, 12);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: SowRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.sow_id, deserialized.sow_id);
        assert_eq!(
            record.days_before_expiration,
            deserialized.days_before_expiration
        );
        assert_eq!(record.active_sow_workers, deserialized.active_sow_workers);
        assert!(deserialized.predicted_criticality.is_none());
    }

    #[test]
    fn test_record_uses_export_header_names() {
        let record = SowRecord::new("SOW-2024-0002", 45, 3);
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"SOW ID\""));
        assert!(json.contains("\"# Days before expiration\""));
        assert!(json.contains("\"Active SOW workers\""));
        // Unannotated records serialize without the predicted column.
        assert!(!json.contains("Predicted Criticality"));
    }
}
