//! Batch evaluation against labelled cases.

use std::collections::BTreeMap;
use std::path::Path;

use repertor_core::models::record::CaseRecord;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::EvaluationError;
use crate::questions::pair_key;
use crate::reference::ReferenceSource;
use crate::workflow::{AnalyzeOptions, Engine};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledCase {
    #[serde(alias = "case_id", alias = "id")]
    pub label: String,
    pub case: CaseRecord,
    #[serde(alias = "expected")]
    pub expected_remedy: String,
}

/// Either a bare array of cases or `{"test_cases": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Dataset {
    Cases(Vec<LabelledCase>),
    Wrapped { test_cases: Vec<LabelledCase> },
}

pub fn parse_dataset(json: &str) -> Result<Vec<LabelledCase>, EvaluationError> {
    Ok(match serde_json::from_str::<Dataset>(json)? {
        Dataset::Cases(cases) | Dataset::Wrapped { test_cases: cases } => cases,
    })
}

pub fn load_dataset(path: &Path) -> Result<Vec<LabelledCase>, EvaluationError> {
    let contents = std::fs::read_to_string(path).map_err(|source| EvaluationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cases = parse_dataset(&contents)?;
    info!(path = %path.display(), cases = cases.len(), "evaluation dataset loaded");
    Ok(cases)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEvaluation {
    pub label: String,
    pub status: String,
    pub expected_remedy: String,
    pub selected_remedy: Option<String>,
    pub confidence: Option<f64>,
    pub hit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub evaluated: usize,
    pub completed: usize,
    pub correct: usize,
    /// `correct / evaluated`, zero for an empty dataset.
    pub accuracy: f64,
    pub by_status: BTreeMap<String, usize>,
    pub cases: Vec<CaseEvaluation>,
}

/// Run every case with the questioning gates disabled so that each one
/// reaches a selection whenever the evidence allows.
pub fn evaluate(
    engine: &Engine,
    cases: &[LabelledCase],
    reference: &dyn ReferenceSource,
) -> EvaluationReport {
    let options = AnalyzeOptions { skip_gating: true };
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut results = Vec::with_capacity(cases.len());

    for labelled in cases {
        let result = engine.analyze(&labelled.case, reference, options);
        let status = result.state().as_str().to_string();
        *by_status.entry(status.clone()).or_default() += 1;

        let recommendation = result.outcome.recommendation();
        let selected_remedy = recommendation.map(|r| r.remedy.clone());
        let hit = selected_remedy
            .as_deref()
            .is_some_and(|remedy| same_remedy(remedy, &labelled.expected_remedy));

        results.push(CaseEvaluation {
            label: labelled.label.clone(),
            status,
            expected_remedy: labelled.expected_remedy.clone(),
            selected_remedy,
            confidence: recommendation.map(|r| r.confidence),
            hit,
        });
    }

    let evaluated = results.len();
    let completed = results.iter().filter(|c| c.selected_remedy.is_some()).count();
    let correct = results.iter().filter(|c| c.hit).count();
    let accuracy = if evaluated == 0 {
        0.0
    } else {
        correct as f64 / evaluated as f64
    };

    info!(evaluated, completed, correct, accuracy, "evaluation finished");

    EvaluationReport {
        evaluated,
        completed,
        correct,
        accuracy,
        by_status,
        cases: results,
    }
}

fn same_remedy(a: &str, b: &str) -> bool {
    pair_key(a) == pair_key(b)
}
