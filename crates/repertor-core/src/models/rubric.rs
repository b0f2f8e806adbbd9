use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A weighted keyword-to-remedy rule. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rubric {
    pub name: String,
    pub weight: u32,
    /// Lowercase, trimmed, de-duplicated.
    pub keywords: Vec<String>,
    pub outcomes: Vec<String>,
}

/// A rubric whose keywords matched the case text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RubricHit {
    pub rubric: String,
    pub weight: u32,
    pub outcomes: Vec<String>,
    pub matched_keywords: Vec<String>,
}

/// A remedy proposed by repertorization. Lives for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OutcomeCandidate {
    pub name: String,
    pub score: f64,
    /// Empty from repertorization.
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RepertoryResult {
    pub hits: Vec<RubricHit>,
    /// Sorted by descending score.
    pub candidates: Vec<OutcomeCandidate>,
}

impl RepertoryResult {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn top(&self, n: usize) -> &[OutcomeCandidate] {
        &self.candidates[..n.min(self.candidates.len())]
    }
}
