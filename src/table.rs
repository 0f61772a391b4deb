//! Tabular input handling: CSV loading, annotation, and display.

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::PipelineError;
use crate::types::criticality::CriticalityLabel;
use crate::types::record::SowRecord;

/// Columns the input file must carry. The predicted column is workflow output
/// and must not be required on load.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "SOW ID",
    "# Days before expiration",
    "SOW Status",
    "SOW title",
    "Contract Id",
    "Active SOW workers",
    "Start Date",
    "End date",
    "Latest maximum budget",
    "currency",
    "supplier",
    "Business Unit",
    "Primary LOB",
    "SOW owner",
];

/// An in-memory SOW table: the unit the workflow loads, annotates and shows.
#[derive(Debug)]
pub struct SowTable {
    records: Vec<SowRecord>,
}

impl SowTable {
    /// Load a table from a CSV file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::NotFound(path.to_path_buf()));
        }

        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(std::io::BufReader::new(file))?;
        info!(path = %path.display(), rows = table.len(), "Loaded SOW table");
        Ok(table)
    }

    /// Core loading logic over any `Read` source, useful for tests.
    ///
    /// The column set is validated against [`REQUIRED_COLUMNS`] before any row
    /// is parsed; a malformed row aborts the load (all-or-nothing).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PipelineError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|required| !headers.iter().any(|h| h == **required))
            .map(|required| required.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::MissingColumns(missing));
        }

        let mut records = Vec::new();
        for result in rdr.deserialize::<SowRecord>() {
            records.push(result?);
        }
        if records.is_empty() {
            return Err(PipelineError::EmptyTable);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[SowRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Attach one predicted label per record.
    ///
    /// Only the predicted column is touched; every loaded column keeps its
    /// value. Errors when the label sequence does not line up with the rows.
    pub fn annotate(&mut self, labels: &[CriticalityLabel]) -> Result<(), PipelineError> {
        if labels.len() != self.records.len() {
            return Err(PipelineError::LabelCount {
                rows: self.records.len(),
                labels: labels.len(),
            });
        }
        for (record, label) in self.records.iter_mut().zip(labels) {
            record.predicted_criticality = Some(*label);
        }
        Ok(())
    }

    /// Count records per predicted label, most severe first.
    pub fn label_distribution(&self) -> Vec<(CriticalityLabel, usize)> {
        CriticalityLabel::ALL
            .iter()
            .map(|label| {
                let count = self
                    .records
                    .iter()
                    .filter(|r| r.predicted_criticality == Some(*label))
                    .count();
                (*label, count)
            })
            .collect()
    }

    /// Render the first `n` rows as an aligned text table.
    pub fn preview(&self, n: usize) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<20} {:>6} {:>8}  {:<16} {:<10} {}\n",
            "SOW ID", "Days", "Workers", "Status", "Predicted", "Title"
        ));
        out.push_str(&format!(
            "{:<20} {:>6} {:>8}  {:<16} {:<10} {}\n",
            "------", "----", "-------", "------", "---------", "-----"
        ));
        for record in self.records.iter().take(n) {
            let predicted = record
                .predicted_criticality
                .map(|l| l.as_str())
                .unwrap_or("-");
            out.push_str(&format!(
                "{:<20} {:>6} {:>8}  {:<16} {:<10} {}\n",
                record.sow_id,
                record.days_before_expiration,
                record.active_sow_workers,
                record.sow_status,
                predicted,
                record.sow_title,
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
SOW ID,# Days before expiration,SOW Status,SOW title,Contract Id,Active SOW workers,Start Date,End date,Latest maximum budget,currency,supplier,Business Unit,Primary LOB,SOW owner
SOW-2024-0001,15,Active,Cloud Migration Support,CNT-2024-0001,12,2025-01-01,2025-12-31,850000,USD,Deloitte,Technology,Cloud Services,Michael Rodriguez
SOW-2024-0002,120,Active,QA Testing Services,CNT-2024-0002,0,2025-01-01,2026-06-30,75000,USD,TCS,Finance,Quality Assurance,Emily Johnson
";

    #[test]
    fn test_load_from_reader() {
        let table = SowTable::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].sow_id, "SOW-2024-0001");
        assert_eq!(table.records()[0].days_before_expiration, 15);
        assert_eq!(table.records()[1].active_sow_workers, 0);
        assert!(table.records()[0].predicted_criticality.is_none());
    }

    #[test]
    fn test_missing_columns_detected_before_rows() {
        let csv = "SOW ID,SOW Status\nSOW-2024-0001,Active\n";
        let err = SowTable::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            PipelineError::MissingColumns(cols) => {
                assert!(cols.contains(&"# Days before expiration".to_string()));
                assert!(cols.contains(&"Active SOW workers".to_string()));
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let header = SAMPLE_CSV.lines().next().unwrap().to_string() + "\n";
        let err = SowTable::from_reader(header.as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyTable));
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = SowTable::load("data/does-not-exist.csv").unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }

    #[test]
    fn test_annotate_adds_only_the_predicted_column() {
        let mut table = SowTable::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let before: Vec<SowRecord> = table.records().to_vec();

        table
            .annotate(&[CriticalityLabel::Critico, CriticalityLabel::Bajo])
            .unwrap();

        for (original, annotated) in before.iter().zip(table.records()) {
            assert_eq!(original.sow_id, annotated.sow_id);
            assert_eq!(
                original.days_before_expiration,
                annotated.days_before_expiration
            );
            assert_eq!(original.active_sow_workers, annotated.active_sow_workers);
            assert_eq!(original.sow_status, annotated.sow_status);
            assert_eq!(
                original.latest_maximum_budget,
                annotated.latest_maximum_budget
            );
            assert_eq!(original.supplier, annotated.supplier);
        }
        assert_eq!(
            table.records()[0].predicted_criticality,
            Some(CriticalityLabel::Critico)
        );
        assert_eq!(
            table.records()[1].predicted_criticality,
            Some(CriticalityLabel::Bajo)
        );
    }

    #[test]
    fn test_annotate_rejects_length_mismatch() {
        let mut table = SowTable::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let err = table.annotate(&[CriticalityLabel::Alto]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::LabelCount { rows: 2, labels: 1 }
        ));
    }

    #[test]
    fn test_label_distribution_and_preview() {
        let mut table = SowTable::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        table
            .annotate(&[CriticalityLabel::Critico, CriticalityLabel::Bajo])
            .unwrap();

        let dist = table.label_distribution();
        assert_eq!(dist[0], (CriticalityLabel::Critico, 1));
        assert_eq!(dist[3], (CriticalityLabel::Bajo, 1));

        let preview = table.preview(1);
        assert!(preview.contains("SOW-2024-0001"));
        assert!(preview.contains("CRÍTICO"));
        assert!(!preview.contains("SOW-2024-0002"));
    }
}
