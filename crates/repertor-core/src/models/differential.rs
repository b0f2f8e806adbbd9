use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Per-category match fractions, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryScores {
    pub mental_emotional: f64,
    pub generals: f64,
    pub causation: f64,
    pub modalities: f64,
    pub particulars: f64,
    pub constitutional: f64,
    pub pattern_layer: f64,
}

impl CategoryScores {
    /// Category names paired with their fractions, heaviest default weight
    /// first.
    pub fn labelled(&self) -> [(&'static str, f64); 7] {
        [
            ("mental/emotional", self.mental_emotional),
            ("causation", self.causation),
            ("generals", self.generals),
            ("constitutional", self.constitutional),
            ("modalities", self.modalities),
            ("pattern layer", self.pattern_layer),
            ("particulars", self.particulars),
        ]
    }
}

/// One remedy in the ranked differential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DifferentialEntry {
    pub remedy: String,
    /// Accumulated repertorization score.
    pub score: f64,
    /// Weighted sum of `categories`.
    pub totality: f64,
    pub characteristic_match_count: usize,
    pub characteristic_matches: Vec<String>,
    pub categories: CategoryScores,
    /// Evidence behind the ranking: characteristic matches, then the
    /// categories the reference text supports.
    pub reasons: Vec<String>,
    /// Reference passages consulted for this remedy.
    pub reference_passages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DifferentialResult {
    pub selected: Option<DifferentialEntry>,
    /// Bounded heuristic in `[0, 1]`, two decimals. Not a probability.
    pub confidence: f64,
    /// Runners-up in rank order, excluding `selected`.
    pub differential: Vec<DifferentialEntry>,
    pub reasoning: String,
}

impl DifferentialResult {
    pub fn none() -> Self {
        Self {
            selected: None,
            confidence: 0.0,
            differential: Vec::new(),
            reasoning: "No candidate remedies to compare".to_string(),
        }
    }
}
