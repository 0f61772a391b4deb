//! Synthetic SOW Dataset Generator
//!
//! Generates a Fieldglass-style CSV of statement-of-work records for
//! exercising the scoring pipeline, including four guaranteed critical demo
//! cases.

use chrono::{Duration, Utc};
use rand::Rng;
use sow_criticality_pipeline::types::record::SowRecord;
use tracing::info;

const SUPPLIERS: &[&str] = &[
    "Accenture",
    "TCS",
    "Infosys",
    "Wipro",
    "Cognizant",
    "Capgemini",
    "Deloitte",
    "PWC",
    "KPMG",
    "EY",
    "Tech Solutions Inc",
    "Global IT Services",
    "DataCore Systems",
    "CloudMasters Ltd",
    "Digital Innovations",
    "Agile Consulting",
];

const BUSINESS_UNITS: &[&str] = &[
    "Technology",
    "Finance",
    "Operations",
    "Marketing",
    "Human Resources",
    "Sales",
    "Customer Service",
    "Product",
    "Engineering",
    "Data & Analytics",
];

const PRIMARY_LOBS: &[&str] = &[
    "IT Infrastructure",
    "Application Development",
    "Data Engineering",
    "Cybersecurity",
    "Cloud Services",
    "Business Intelligence",
    "Project Management",
    "Quality Assurance",
    "DevOps",
    "Digital Transformation",
    "AI/ML Services",
];

const SOW_TITLES: &[&str] = &[
    "Software Development Services",
    "Data Engineering Team Augmentation",
    "Cloud Migration Support",
    "Cybersecurity Assessment and Remediation",
    "Business Intelligence Dashboard Development",
    "Mobile App Development",
    "Infrastructure Maintenance and Support",
    "QA Testing Services",
    "DevOps Pipeline Implementation",
    "SAP Implementation Services",
    "Salesforce Customization",
    "Network Security Enhancement",
    "Data Analytics Consulting",
    "UX/UI Design Services",
    "Technical Support Tier 2/3",
];

const SOW_OWNERS: &[&str] = &[
    "John Martinez",
    "Sarah Chen",
    "Michael Rodriguez",
    "Emily Johnson",
    "David Kim",
    "Lisa Anderson",
    "Robert Garcia",
    "Jennifer Lee",
    "William Brown",
    "Maria Santos",
    "James Wilson",
    "Patricia Davis",
    "Carlos Hernandez",
    "Amanda Taylor",
    "Daniel Moore",
];

// USD-weighted, like the real exports
const CURRENCIES: &[&str] = &["USD", "USD", "USD", "EUR", "GBP"];

/// SOW record generator for testing
struct SowGenerator {
    rng: rand::rngs::ThreadRng,
    counter: u64,
}

impl SowGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
            counter: 0,
        }
    }

    /// Generate a random SOW with a realistic expiration/staffing profile.
    ///
    /// Days to expiration: 80% land in 31–365, 15% in the 1–30 critical
    /// window, 5% recently expired. Worker counts follow the budget.
    fn generate(&mut self) -> SowRecord {
        self.counter += 1;
        let year = *self.random_choice(&["2023", "2024", "2025"]);

        let distribution: f64 = self.rng.gen();
        let days_before_expiration: i64 = if distribution < 0.80 {
            self.rng.gen_range(31..=365)
        } else if distribution < 0.95 {
            self.rng.gen_range(1..=30)
        } else {
            self.rng.gen_range(-10..=0)
        };

        let budget: f64 = match self.rng.gen_range(0..4) {
            0 => self.rng.gen_range(25_000..100_000),
            1 => self.rng.gen_range(100_000..300_000),
            2 => self.rng.gen_range(300_000..750_000),
            _ => self.rng.gen_range(750_000..2_000_000),
        } as f64;

        let active_workers = self.realistic_workers(days_before_expiration, budget);

        let status = if days_before_expiration < 0 {
            "Expired"
        } else if days_before_expiration < 30 {
            *self.random_choice(&["Active", "Pending Renewal", "Active"])
        } else {
            "Active"
        };

        let duration_days = *self
            .random_choice(&[180i64, 270, 365, 545, 730]);
        let end_date = Utc::now() + Duration::days(days_before_expiration);
        let start_date = end_date - Duration::days(duration_days);

        SowRecord {
            sow_id: format!("SOW-{}-{:04}", year, self.counter),
            days_before_expiration,
            sow_status: status.to_string(),
            sow_title: self.random_choice(SOW_TITLES).to_string(),
            contract_id: format!("CNT-{}-{:04}", year, self.counter),
            active_sow_workers: active_workers,
            start_date: start_date.format("%Y-%m-%d").to_string(),
            end_date: end_date.format("%Y-%m-%d").to_string(),
            latest_maximum_budget: budget,
            currency: self.random_choice(CURRENCIES).to_string(),
            supplier: self.random_choice(SUPPLIERS).to_string(),
            business_unit: self.random_choice(BUSINESS_UNITS).to_string(),
            primary_lob: self.random_choice(PRIMARY_LOBS).to_string(),
            sow_owner: self.random_choice(SOW_OWNERS).to_string(),
            predicted_criticality: None,
        }
    }

    /// Staffing follows the budget; expired contracts almost never keep
    /// workers on board.
    fn realistic_workers(&mut self, days_before_expiration: i64, budget: f64) -> i64 {
        if days_before_expiration < 0 {
            return if self.rng.gen_bool(0.05) {
                self.rng.gen_range(1..=2)
            } else {
                0
            };
        }

        if budget > 500_000.0 {
            self.rng.gen_range(10..=50)
        } else if budget > 200_000.0 {
            self.rng.gen_range(5..=20)
        } else if budget > 50_000.0 {
            self.rng.gen_range(1..=10)
        } else {
            self.rng.gen_range(0..=5)
        }
    }

    fn random_choice<'a, T>(&mut self, choices: &'a [T]) -> &'a T {
        &choices[self.rng.gen_range(0..choices.len())]
    }
}

/// The four guaranteed critical demo cases, mirrored from the curated demo
/// dataset: heavily staffed near expiry, moderately staffed near expiry, an
/// expired-but-staffed compliance issue, and near expiry without workers.
fn critical_demo_cases() -> Vec<SowRecord> {
    let today = Utc::now();
    let dated = |offset: i64| (today + Duration::days(offset)).format("%Y-%m-%d").to_string();

    vec![
        SowRecord {
            sow_id: "SOW-2024-CRIT-001".to_string(),
            days_before_expiration: 28,
            sow_status: "Active".to_string(),
            sow_title: "Enterprise Data Platform Development".to_string(),
            contract_id: "CNT-2024-CRIT-001".to_string(),
            active_sow_workers: 25,
            start_date: dated(-337),
            end_date: dated(28),
            latest_maximum_budget: 1_500_000.0,
            currency: "USD".to_string(),
            supplier: "Accenture".to_string(),
            business_unit: "Technology".to_string(),
            primary_lob: "Data Engineering".to_string(),
            sow_owner: "Sarah Chen".to_string(),
            predicted_criticality: None,
        },
        SowRecord {
            sow_id: "SOW-2024-CRIT-002".to_string(),
            days_before_expiration: 15,
            sow_status: "Active".to_string(),
            sow_title: "Cloud Infrastructure Migration".to_string(),
            contract_id: "CNT-2024-CRIT-002".to_string(),
            active_sow_workers: 12,
            start_date: dated(-350),
            end_date: dated(15),
            latest_maximum_budget: 850_000.0,
            currency: "USD".to_string(),
            supplier: "Deloitte".to_string(),
            business_unit: "Technology".to_string(),
            primary_lob: "Cloud Services".to_string(),
            sow_owner: "Michael Rodriguez".to_string(),
            predicted_criticality: None,
        },
        SowRecord {
            sow_id: "SOW-2024-CRIT-003".to_string(),
            days_before_expiration: -5,
            sow_status: "Expired".to_string(),
            sow_title: "Cybersecurity Operations Support".to_string(),
            contract_id: "CNT-2024-CRIT-003".to_string(),
            active_sow_workers: 8,
            start_date: dated(-370),
            end_date: dated(-5),
            latest_maximum_budget: 450_000.0,
            currency: "USD".to_string(),
            supplier: "Cognizant".to_string(),
            business_unit: "Technology".to_string(),
            primary_lob: "Cybersecurity".to_string(),
            sow_owner: "Jennifer Lee".to_string(),
            predicted_criticality: None,
        },
        SowRecord {
            sow_id: "SOW-2024-CRIT-004".to_string(),
            days_before_expiration: 20,
            sow_status: "Active".to_string(),
            sow_title: "Software License Management".to_string(),
            contract_id: "CNT-2024-CRIT-004".to_string(),
            active_sow_workers: 0,
            start_date: dated(-345),
            end_date: dated(20),
            latest_maximum_budget: 75_000.0,
            currency: "USD".to_string(),
            supplier: "Tech Solutions Inc".to_string(),
            business_unit: "Finance".to_string(),
            primary_lob: "IT Infrastructure".to_string(),
            sow_owner: "David Kim".to_string(),
            predicted_criticality: None,
        },
    ]
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("generate_sows=info".parse()?),
        )
        .init();

    info!("Starting SOW dataset generator");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let out_path = args.get(1).map(|s| s.as_str()).unwrap_or("data/sows.csv");
    let count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(150);

    info!(out = %out_path, count = count, "Configuration loaded");

    // Guaranteed demo cases first, then random fill to the requested count
    let mut records = critical_demo_cases();
    let mut generator = SowGenerator::new();
    while records.len() < count {
        records.push(generator.generate());
    }

    // Most urgent first: fewest days, then heaviest staffing
    records.sort_by(|a, b| {
        a.days_before_expiration
            .cmp(&b.days_before_expiration)
            .then(b.active_sow_workers.cmp(&a.active_sow_workers))
    });

    let mut writer = csv::Writer::from_path(out_path)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let critical_window = records
        .iter()
        .filter(|r| r.days_before_expiration <= 30)
        .count();
    let staffed = records.iter().filter(|r| r.active_sow_workers > 0).count();
    let expired = records
        .iter()
        .filter(|r| r.days_before_expiration < 0)
        .count();

    info!(
        total = records.len(),
        critical_window = critical_window,
        staffed = staffed,
        expired = expired,
        "Dataset written"
    );

    Ok(())
}
