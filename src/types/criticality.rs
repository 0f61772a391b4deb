//! Criticality label and the business rule table behind it

use serde::{Deserialize, Serialize};

/// Criticality classification for a SOW.
///
/// Serializes to the Spanish labels used by the original business rules and
/// the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriticalityLabel {
    #[serde(rename = "CRÍTICO")]
    Critico,
    #[serde(rename = "ALTO")]
    Alto,
    #[serde(rename = "MEDIO")]
    Medio,
    #[serde(rename = "BAJO")]
    Bajo,
}

impl CriticalityLabel {
    /// All labels, most severe first. Drives summary ordering.
    pub const ALL: [CriticalityLabel; 4] = [
        CriticalityLabel::Critico,
        CriticalityLabel::Alto,
        CriticalityLabel::Medio,
        CriticalityLabel::Bajo,
    ];

    /// Classify a SOW from the rule table.
    ///
    /// Evaluated top to bottom, first match wins:
    /// - ≤ 30 days with workers on board → CRÍTICO
    /// - ≤ 30 days without workers, or 31–60 days with more than 5 workers → ALTO
    /// - 31–90 days otherwise → MEDIO
    /// - beyond 90 days → BAJO
    ///
    /// Negative day counts (already expired) fall into the ≤ 30 band, so an
    /// expired SOW that still has active workers is CRÍTICO. The worker
    /// escalation applies only to the 31–60 band; 61–90 days is MEDIO
    /// regardless of staffing.
    pub fn from_rules(days_before_expiration: i64, active_workers: i64) -> Self {
        if days_before_expiration <= 30 && active_workers > 0 {
            CriticalityLabel::Critico
        } else if days_before_expiration <= 30
            || ((31..=60).contains(&days_before_expiration) && active_workers > 5)
        {
            CriticalityLabel::Alto
        } else if (31..=90).contains(&days_before_expiration) {
            CriticalityLabel::Medio
        } else {
            CriticalityLabel::Bajo
        }
    }

    /// Severity rank, higher is more urgent. Used to break ensemble vote ties
    /// toward the conservative side.
    pub fn severity(&self) -> u8 {
        match self {
            CriticalityLabel::Critico => 3,
            CriticalityLabel::Alto => 2,
            CriticalityLabel::Medio => 1,
            CriticalityLabel::Bajo => 0,
        }
    }

    /// The label string as it appears in data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            CriticalityLabel::Critico => "CRÍTICO",
            CriticalityLabel::Alto => "ALTO",
            CriticalityLabel::Medio => "MEDIO",
            CriticalityLabel::Bajo => "BAJO",
        }
    }
}

impl std::fmt::Display for CriticalityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
