use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::differential::DifferentialEntry;

/// Centesimal potency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Potency {
    #[serde(rename = "6C")]
    C6,
    #[serde(rename = "30C")]
    C30,
    #[serde(rename = "200C")]
    C200,
}

impl fmt::Display for Potency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Potency::C6 => "6C",
            Potency::C30 => "30C",
            Potency::C200 => "200C",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CaseType {
    Acute,
    Chronic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Vitality {
    Low,
    Moderate,
    High,
}

/// The rows of the potency decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DosingProtocol {
    AcuteHighVitality,
    AcuteModerate,
    AcuteLowVitality,
    ChronicDeep,
    ChronicModerate,
    ChronicTrial,
}

impl DosingProtocol {
    pub fn potency(&self) -> Potency {
        match self {
            DosingProtocol::AcuteHighVitality | DosingProtocol::ChronicDeep => Potency::C200,
            DosingProtocol::AcuteModerate
            | DosingProtocol::ChronicModerate
            | DosingProtocol::ChronicTrial => Potency::C30,
            DosingProtocol::AcuteLowVitality => Potency::C6,
        }
    }

    pub fn repetition(&self) -> &'static str {
        match self {
            DosingProtocol::AcuteHighVitality => "Single dose, observe 12-24 hours",
            DosingProtocol::AcuteModerate => "Single dose, may repeat after 6-12 hours if needed",
            DosingProtocol::AcuteLowVitality => "May repeat every 2-4 hours in acute phase",
            DosingProtocol::ChronicDeep => "Single dose, wait 7-14 days, observe carefully",
            DosingProtocol::ChronicModerate => "Single dose, wait 5-7 days, observe response",
            DosingProtocol::ChronicTrial => {
                "Single dose as a trial prescription, reassess after 5-7 days"
            }
        }
    }

    pub fn follow_up(&self) -> &'static str {
        match self {
            DosingProtocol::AcuteHighVitality => "Reassess after 24 hours",
            DosingProtocol::AcuteModerate => "Reassess after 48 hours",
            DosingProtocol::AcuteLowVitality => "Reassess after 3 days",
            DosingProtocol::ChronicDeep => "Monthly follow-up for the first 3 months",
            DosingProtocol::ChronicModerate => "Follow-up every 2-3 weeks",
            DosingProtocol::ChronicTrial => "Follow-up after 1 week",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PotencySelection {
    pub case_type: CaseType,
    pub vitality: Vitality,
    pub protocol: DosingProtocol,
    pub potency: Potency,
    pub repetition: String,
    pub follow_up: String,
}

impl PotencySelection {
    pub fn from_protocol(case_type: CaseType, vitality: Vitality, protocol: DosingProtocol) -> Self {
        Self {
            case_type,
            vitality,
            protocol,
            potency: protocol.potency(),
            repetition: protocol.repetition().to_string(),
            follow_up: protocol.follow_up().to_string(),
        }
    }
}

/// The payload of a completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendation {
    pub remedy: String,
    pub potency: PotencySelection,
    pub confidence: f64,
    pub characteristic_symptoms: Vec<String>,
    pub differential: Vec<DifferentialEntry>,
    pub reasoning: String,
    pub clinical_notes: Vec<String>,
}
