use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::completeness::{AskReason, PrioritizedQuestion};
use super::differential::DifferentialEntry;
use super::recommendation::Recommendation;
use super::rubric::OutcomeCandidate;

/// Workflow stages in traversal order. The sequencer only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Stage {
    SafetyScreen,
    Validate,
    Repertorize,
    RetrieveReference,
    PreCheck,
    Differentiate,
    PostCheck,
    Prescribe,
}

/// State tags. `InProgress` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WorkflowState {
    InProgress,
    Emergency,
    Incomplete,
    NoCandidates,
    NeedsMoreInformation,
    NeedsClarification,
    InsufficientEvidence,
    Complete,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::InProgress => "in_progress",
            WorkflowState::Emergency => "emergency",
            WorkflowState::Incomplete => "incomplete",
            WorkflowState::NoCandidates => "no_candidates",
            WorkflowState::NeedsMoreInformation => "needs_more_information",
            WorkflowState::NeedsClarification => "needs_clarification",
            WorkflowState::InsufficientEvidence => "insufficient_evidence",
            WorkflowState::Complete => "complete",
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self != WorkflowState::InProgress
    }
}

/// Terminal outcome of one analysis, each state with its own payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum WorkflowOutcome {
    Emergency {
        red_flags: Vec<String>,
        message: String,
        disclaimer: String,
    },
    Incomplete {
        missing_fields: Vec<String>,
        message: String,
    },
    NoCandidates {
        message: String,
    },
    NeedsMoreInformation {
        reason: AskReason,
        completeness_score: f64,
        questions: Vec<PrioritizedQuestion>,
        message: String,
    },
    NeedsClarification {
        reason: AskReason,
        completeness_score: f64,
        confidence: f64,
        provisional_remedy: String,
        differential: Vec<DifferentialEntry>,
        questions: Vec<String>,
        message: String,
    },
    InsufficientEvidence {
        candidates: Vec<OutcomeCandidate>,
        message: String,
        disclaimer: String,
    },
    Complete {
        recommendation: Recommendation,
        message: String,
        disclaimer: String,
    },
}

impl WorkflowOutcome {
    pub fn state(&self) -> WorkflowState {
        match self {
            WorkflowOutcome::Emergency { .. } => WorkflowState::Emergency,
            WorkflowOutcome::Incomplete { .. } => WorkflowState::Incomplete,
            WorkflowOutcome::NoCandidates { .. } => WorkflowState::NoCandidates,
            WorkflowOutcome::NeedsMoreInformation { .. } => WorkflowState::NeedsMoreInformation,
            WorkflowOutcome::NeedsClarification { .. } => WorkflowState::NeedsClarification,
            WorkflowOutcome::InsufficientEvidence { .. } => WorkflowState::InsufficientEvidence,
            WorkflowOutcome::Complete { .. } => WorkflowState::Complete,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            WorkflowOutcome::Emergency { message, .. }
            | WorkflowOutcome::Incomplete { message, .. }
            | WorkflowOutcome::NoCandidates { message }
            | WorkflowOutcome::NeedsMoreInformation { message, .. }
            | WorkflowOutcome::NeedsClarification { message, .. }
            | WorkflowOutcome::InsufficientEvidence { message, .. }
            | WorkflowOutcome::Complete { message, .. } => message,
        }
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            WorkflowOutcome::Complete { recommendation, .. } => Some(recommendation),
            _ => None,
        }
    }
}

/// Created once per record submission and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WorkflowResult {
    pub outcome: WorkflowOutcome,
    /// Stages that ran, in order.
    pub stages: Vec<Stage>,
}

impl WorkflowResult {
    pub fn state(&self) -> WorkflowState {
        self.outcome.state()
    }
}
