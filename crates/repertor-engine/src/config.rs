//! Engine configuration: the rubric table, question bank, red-flag list,
//! weights, and thresholds. Built once at startup and shared read-only.

use std::path::{Path, PathBuf};

use repertor_core::models::rubric::Rubric;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::potency::PotencyMarkers;
use crate::questions::QuestionBank;
use crate::repertory::RubricTable;
use crate::safety::SafetyGate;
use crate::totality::TotalityWeights;

/// Workflow gates and limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Below this completeness the pre-check asks for more information.
    pub pre_check_min_completeness: f64,
    /// Below this confidence close candidates need clarifying.
    pub clarification_confidence: f64,
    /// Completeness required before a case counts as ready.
    pub ready_min_completeness: f64,
    /// Most gaps a ready case may still have.
    pub max_ready_gaps: usize,
    /// Candidates passed to reference retrieval.
    pub top_candidates: usize,
    /// Candidates compared by the totality scorer.
    pub differential_depth: usize,
    /// Candidates kept after repertorization.
    pub max_candidates: usize,
    /// Passages taken per remedy from a static corpus.
    pub passages_per_remedy: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pre_check_min_completeness: 0.6,
            clarification_confidence: 0.7,
            ready_min_completeness: 0.7,
            max_ready_gaps: 2,
            top_candidates: 5,
            differential_depth: 3,
            max_candidates: 10,
            passages_per_remedy: 2,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("pre_check_min_completeness", self.pre_check_min_completeness),
            ("clarification_confidence", self.clarification_confidence),
            ("ready_min_completeness", self.ready_min_completeness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(name, "must be within [0, 1]"));
            }
        }
        for (name, value) in [
            ("top_candidates", self.top_candidates),
            ("differential_depth", self.differential_depth),
            ("max_candidates", self.max_candidates),
            ("passages_per_remedy", self.passages_per_remedy),
        ] {
            if value == 0 {
                return Err(invalid(name, "must be at least 1"));
            }
        }
        Ok(())
    }
}

/// Optional settings file. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Replaces the built-in emergency phrases when present.
    pub red_flags: Option<Vec<String>>,
    pub weights: TotalityWeights,
    pub thresholds: Thresholds,
    pub potency_markers: PotencyMarkers,
    /// Drop candidates without reference passages instead of scoring them.
    pub require_reference_text: bool,
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings: EngineSettings = read_json(path)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        if self.weights.all().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("weights", "must be finite and non-negative"));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// A list column given either as a JSON array or as one delimited string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    List(Vec<String>),
    Delimited(String),
}

impl ListField {
    fn split(self, delimiter: char) -> Vec<String> {
        match self {
            ListField::List(items) => items,
            ListField::Delimited(text) => text.split(delimiter).map(str::to_string).collect(),
        }
    }
}

/// One row of a rubric table file.
#[derive(Debug, Clone, Deserialize)]
pub struct RubricRow {
    #[serde(alias = "name")]
    pub rubric: String,
    #[serde(default = "default_weight")]
    pub weight: i64,
    pub keywords: ListField,
    #[serde(alias = "outcomes")]
    pub candidate_remedies: ListField,
}

fn default_weight() -> i64 {
    1
}

impl RubricRow {
    fn into_rubric(self) -> Result<Rubric, ConfigError> {
        let weight = u32::try_from(self.weight)
            .ok()
            .filter(|w| *w > 0)
            .ok_or_else(|| ConfigError::InvalidWeight {
                rubric: self.rubric.trim().to_string(),
                weight: self.weight,
            })?;
        Ok(Rubric {
            name: self.rubric,
            weight,
            keywords: self.keywords.split(','),
            outcomes: self.candidate_remedies.split(';'),
        })
    }
}

/// Validate rows into a rubric table.
pub fn rubric_table(rows: Vec<RubricRow>) -> Result<RubricTable, ConfigError> {
    let rubrics = rows
        .into_iter()
        .map(RubricRow::into_rubric)
        .collect::<Result<Vec<_>, _>>()?;
    RubricTable::new(rubrics)
}

pub fn load_rubrics(path: &Path) -> Result<RubricTable, ConfigError> {
    let rows: Vec<RubricRow> = read_json(path)?;
    let table = rubric_table(rows)?;
    info!(path = %path.display(), rubrics = table.len(), "rubric table loaded");
    Ok(table)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Files an [`EngineConfig`] is loaded from.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub rubrics: PathBuf,
    pub settings: Option<PathBuf>,
    pub questions: Option<PathBuf>,
}

/// Every immutable table the engine reads. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub rubrics: RubricTable,
    pub questions: QuestionBank,
    pub safety: SafetyGate,
    pub settings: EngineSettings,
}

impl EngineConfig {
    pub fn new(
        rubrics: RubricTable,
        questions: QuestionBank,
        settings: EngineSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        questions.validate()?;
        let safety = match &settings.red_flags {
            Some(phrases) => SafetyGate::new(phrases)?,
            None => SafetyGate::default(),
        };
        Ok(Self {
            rubrics,
            questions,
            safety,
            settings,
        })
    }

    /// Built-in question bank and default settings.
    pub fn with_rubrics(rubrics: RubricTable) -> Result<Self, ConfigError> {
        Self::new(rubrics, QuestionBank::builtin(), EngineSettings::default())
    }

    pub fn load(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        let rubrics = load_rubrics(&paths.rubrics)?;
        let settings = match &paths.settings {
            Some(path) => EngineSettings::load(path)?,
            None => EngineSettings::default(),
        };
        let questions = match &paths.questions {
            Some(path) => QuestionBank::load(path)?,
            None => QuestionBank::builtin(),
        };
        let config = Self::new(rubrics, questions, settings)?;
        info!(
            rubrics = config.rubrics.len(),
            red_flags = config.safety.phrases().len(),
            categories = config.questions.categories.len(),
            "engine configuration ready"
        );
        Ok(config)
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.settings.thresholds
    }
}
