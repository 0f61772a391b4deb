//! Type definitions for the criticality scoring pipeline

pub mod criticality;
pub mod record;

pub use criticality::CriticalityLabel;
pub use record::SowRecord;
