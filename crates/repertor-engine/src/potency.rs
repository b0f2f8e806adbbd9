//! Potency and repetition selection. A pure decision table over case type,
//! vitality, mental-symptom density, and differential confidence.

use repertor_core::models::recommendation::{CaseType, DosingProtocol, PotencySelection, Vitality};
use repertor_core::models::record::{CaseRecord, non_blank};
use serde::{Deserialize, Serialize};

use crate::text::contains_phrase;

/// Mental/emotional symptoms needed for a "clear mental picture".
pub const STRONG_MENTAL_THRESHOLD: usize = 3;
pub const HIGH_CONFIDENCE: f64 = 0.8;
pub const MODERATE_CONFIDENCE: f64 = 0.6;

/// Marker word lists, matched as lowercase substrings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotencyMarkers {
    /// Searched in onset and duration.
    pub acute: Vec<String>,
    /// Searched in generals and lifestyle.
    pub debility: Vec<String>,
    /// Searched in presenting complaint and onset.
    pub vigour: Vec<String>,
}

impl Default for PotencyMarkers {
    fn default() -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            acute: owned(&["sudden", "hours", "days", "yesterday", "today", "acute"]),
            debility: owned(&["weak", "exhausted", "elderly", "debilitated", "chronic"]),
            vigour: owned(&["sudden", "violent", "intense", "high fever", "vigorous"]),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PotencySelector {
    pub markers: PotencyMarkers,
}

impl PotencySelector {
    pub fn new(markers: PotencyMarkers) -> Self {
        Self { markers }
    }

    pub fn select(&self, record: &CaseRecord, confidence: f64) -> PotencySelection {
        let case_type = self.case_type(record);
        let vitality = self.vitality(record, case_type);
        let strong_mental = non_blank(&record.mental_emotional) >= STRONG_MENTAL_THRESHOLD;

        let protocol = match (case_type, vitality) {
            (CaseType::Acute, Vitality::High) => DosingProtocol::AcuteHighVitality,
            (CaseType::Acute, Vitality::Moderate) => DosingProtocol::AcuteModerate,
            (CaseType::Acute, Vitality::Low) => DosingProtocol::AcuteLowVitality,
            (CaseType::Chronic, _) if strong_mental && confidence >= HIGH_CONFIDENCE => {
                DosingProtocol::ChronicDeep
            }
            (CaseType::Chronic, _) if confidence >= MODERATE_CONFIDENCE => {
                DosingProtocol::ChronicModerate
            }
            (CaseType::Chronic, _) => DosingProtocol::ChronicTrial,
        };

        PotencySelection::from_protocol(case_type, vitality, protocol)
    }

    pub fn case_type(&self, record: &CaseRecord) -> CaseType {
        let text = format!(
            "{} {}",
            record.duration_text().unwrap_or_default(),
            record.onset_text().unwrap_or_default()
        )
        .to_lowercase();
        if any_marker(&text, &self.markers.acute) {
            CaseType::Acute
        } else {
            CaseType::Chronic
        }
    }

    /// Low on any debility marker. High only for acute cases with a vigour
    /// marker and no debility. Moderate otherwise.
    pub fn vitality(&self, record: &CaseRecord, case_type: CaseType) -> Vitality {
        let general_text = record
            .generals
            .iter()
            .chain(&record.lifestyle)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if any_marker(&general_text, &self.markers.debility) {
            return Vitality::Low;
        }

        if case_type == CaseType::Acute {
            let onset_text = format!(
                "{} {}",
                record.presenting_complaint,
                record.onset_text().unwrap_or_default()
            )
            .to_lowercase();
            if any_marker(&onset_text, &self.markers.vigour) {
                return Vitality::High;
            }
        }

        Vitality::Moderate
    }
}

fn any_marker(text: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| contains_phrase(text, m))
}
