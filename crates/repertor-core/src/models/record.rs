use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Whether the subject generally runs hot or cold.
///
/// Deserializes case-insensitively; `chilly` reads as [`ThermalState::Cold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ThermalState {
    Hot,
    Cold,
    Variable,
}

impl ThermalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThermalState::Hot => "hot",
            ThermalState::Cold => "cold",
            ThermalState::Variable => "variable",
        }
    }

    /// Words that stand for this state in case text and reference text,
    /// canonical label first.
    pub fn terms(&self) -> &'static [&'static str] {
        match self {
            ThermalState::Hot => &["hot"],
            ThermalState::Cold => &["cold", "chilly"],
            ThermalState::Variable => &["variable"],
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "hot" => Some(ThermalState::Hot),
            "cold" | "chilly" => Some(ThermalState::Cold),
            "variable" => Some(ThermalState::Variable),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ThermalState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        ThermalState::parse(&label).ok_or_else(|| {
            serde::de::Error::unknown_variant(&label, &["hot", "cold", "chilly", "variable"])
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Female,
    Male,
    Other,
}

/// A localized symptom. Owned by exactly one [`CaseRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Particular {
    /// Body region or system, e.g. "head" or "skin".
    pub section: Option<String>,
    pub description: String,
    pub modalities_better: Vec<String>,
    pub modalities_worse: Vec<String>,
    pub concomitants: Vec<String>,
}

impl Particular {
    pub fn modality_count(&self) -> usize {
        non_blank(&self.modalities_better) + non_blank(&self.modalities_worse)
    }
}

/// The subject's case as taken at intake.
///
/// Every field is optional on the wire; `presenting_complaint` must be
/// non-blank before any scoring runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct CaseRecord {
    /// Administrative identifier. Never matched against rubrics.
    pub case_id: Option<String>,
    pub sex: Option<Sex>,
    pub presenting_complaint: String,
    pub onset: Option<String>,
    pub duration: Option<String>,
    pub course: Option<String>,
    pub etiology: Option<String>,
    pub mental_emotional: Vec<String>,
    pub generals: Vec<String>,
    pub cravings: Vec<String>,
    pub aversions: Vec<String>,
    pub sleep: Vec<String>,
    pub dreams: Vec<String>,
    pub past_history: Vec<String>,
    pub family_history: Vec<String>,
    pub lifestyle: Vec<String>,
    pub thermal: Option<ThermalState>,
    pub particulars: Vec<Particular>,
    /// Concerns flagged by the intake form itself.
    pub red_flags: Vec<String>,
}

impl CaseRecord {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_presenting_complaint(&self) -> bool {
        !self.presenting_complaint.trim().is_empty()
    }

    /// Required fields that are absent or blank.
    pub fn missing_required_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.has_presenting_complaint() {
            missing.push("presenting_complaint".to_string());
        }
        missing
    }

    /// Fails with the first missing required field.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.missing_required_fields().into_iter().next() {
            Some(field) => Err(CoreError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Total better/worse modalities across all particulars.
    pub fn modality_count(&self) -> usize {
        self.particulars.iter().map(Particular::modality_count).sum()
    }

    /// Etiology text if present and non-blank.
    pub fn etiology_text(&self) -> Option<&str> {
        present(&self.etiology)
    }

    pub fn onset_text(&self) -> Option<&str> {
        present(&self.onset)
    }

    pub fn duration_text(&self) -> Option<&str> {
        present(&self.duration)
    }

    /// Short free-text summary used when querying reference material.
    pub fn case_summary(&self) -> String {
        let mut parts = vec![self.presenting_complaint.trim().to_string()];
        parts.extend(self.mental_emotional.iter().map(|s| s.trim().to_string()));
        parts.extend(self.generals.iter().map(|s| s.trim().to_string()));
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Count of entries with non-whitespace content.
pub fn non_blank(items: &[String]) -> usize {
    items.iter().filter(|s| !s.trim().is_empty()).count()
}
