use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A symptom category under-represented in the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompletenessGap {
    pub category: String,
    pub weight: u32,
    pub current_count: usize,
    pub needed: usize,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompletenessReport {
    /// Weighted coverage in `[0, 1]`.
    pub score: f64,
    /// Sorted by descending weight.
    pub gaps: Vec<CompletenessGap>,
    pub priority_questions: Vec<String>,
    pub ready_to_proceed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionKind {
    Essential,
    Differential,
    Modality,
    Clarification,
    Constitutional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PrioritizedQuestion {
    pub question: String,
    pub kind: QuestionKind,
    pub priority: QuestionPriority,
}

/// Why the engine wants more information before committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AskReason {
    InsufficientInformation,
    DifferentiateCandidates,
    EssentialCategoriesIncomplete,
}

impl AskReason {
    pub fn message(&self) -> &'static str {
        match self {
            AskReason::InsufficientInformation => {
                "Case information insufficient for safe prescribing"
            }
            AskReason::DifferentiateCandidates => {
                "Need to differentiate between top remedy candidates"
            }
            AskReason::EssentialCategoriesIncomplete => {
                "Essential information categories incomplete"
            }
        }
    }
}

/// Completeness plus the prioritized follow-up questions for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionPlan {
    pub should_ask: bool,
    pub reason: Option<AskReason>,
    pub completeness_score: f64,
    pub questions: Vec<PrioritizedQuestion>,
    pub completeness: CompletenessReport,
}
