//! Follow-up question banks.
//!
//! Loaded once at startup (built-in tables, or a JSON file of the same shape)
//! and never mutated. Every bank must be non-empty.

mod builtin;

use std::path::Path;

use repertor_core::models::record::Sex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Where a completeness category takes its item count from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    MentalEmotional,
    Generals,
    Thermal,
    Modalities,
    FoodPreferences,
    Sleep,
    Dreams,
    Causation,
    Laterality,
    Discharges,
    Menstrual,
    PastHistory,
    FamilyHistory,
    Lifestyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub weight: u32,
    pub min_required: usize,
    pub source: CategorySource,
    /// Only scored for records of this sex.
    #[serde(default)]
    pub applicable_to: Option<Sex>,
    pub questions: Vec<String>,
}

/// Questions that separate two specific remedies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentialPair {
    pub first: String,
    pub second: String,
    pub questions: Vec<String>,
}

/// Clarifications asked when a symptom keyword appears in the complaint or
/// a particular.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomClarification {
    pub keyword: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub categories: Vec<CategoryConfig>,
    pub differential_pairs: Vec<DifferentialPair>,
    pub generic_differential: Vec<String>,
    pub symptom_clarifications: Vec<SymptomClarification>,
    pub modality_questions: Vec<String>,
    pub constitutional_questions: Vec<String>,
}

impl QuestionBank {
    pub fn builtin() -> Self {
        Self {
            categories: builtin::categories(),
            differential_pairs: builtin::differential_pairs(),
            generic_differential: builtin::generic_differential(),
            symptom_clarifications: builtin::symptom_clarifications(),
            modality_questions: builtin::modality_questions(),
            constitutional_questions: builtin::constitutional_questions(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bank: QuestionBank =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        bank.validate()?;
        info!(path = %path.display(), categories = bank.categories.len(), "question bank loaded");
        Ok(bank)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::EmptyQuestionBank("categories".to_string()));
        }
        for category in &self.categories {
            let invalid = |reason: &str| ConfigError::InvalidCategory {
                category: category.name.clone(),
                reason: reason.to_string(),
            };
            if category.weight == 0 {
                return Err(invalid("weight must be positive"));
            }
            if category.min_required == 0 {
                return Err(invalid("min_required must be at least 1"));
            }
            if category.questions.is_empty() {
                return Err(ConfigError::EmptyQuestionBank(format!(
                    "category {}",
                    category.name
                )));
            }
        }
        for pair in &self.differential_pairs {
            if pair.questions.is_empty() {
                return Err(ConfigError::EmptyQuestionBank(format!(
                    "differential {} vs {}",
                    pair.first, pair.second
                )));
            }
        }
        for clarification in &self.symptom_clarifications {
            if clarification.questions.is_empty() {
                return Err(ConfigError::EmptyQuestionBank(format!(
                    "clarification {}",
                    clarification.keyword
                )));
            }
        }
        for (name, bank) in [
            ("generic_differential", &self.generic_differential),
            ("modality_questions", &self.modality_questions),
            ("constitutional_questions", &self.constitutional_questions),
        ] {
            if bank.is_empty() {
                return Err(ConfigError::EmptyQuestionBank(name.to_string()));
            }
        }
        Ok(())
    }

    /// Questions for the two leading remedies, in either order. Falls back to
    /// the generic differentiating questions.
    pub fn differential_questions(&self, first: &str, second: &str) -> &[String] {
        let (a, b) = (pair_key(first), pair_key(second));
        self.differential_pairs
            .iter()
            .find(|pair| {
                let (x, y) = (pair_key(&pair.first), pair_key(&pair.second));
                (x == a && y == b) || (x == b && y == a)
            })
            .map(|pair| pair.questions.as_slice())
            .unwrap_or(&self.generic_differential)
    }
}

/// `"Nux Vomica"` becomes `"nux_vomica"`.
pub fn pair_key(remedy: &str) -> String {
    remedy.trim().to_lowercase().replace(' ', "_")
}
