//! The analysis workflow.
//!
//! A forward-only state machine over [`Stage`]. Every stage either advances
//! to the next stage or finishes with a terminal [`WorkflowOutcome`]; nothing
//! loops back. Analysis never fails: input defects, an empty match, and
//! collaborator errors all become outcomes or degraded results.

use std::sync::Arc;

use repertor_core::messages;
use repertor_core::models::completeness::{CompletenessReport, QuestionPlan};
use repertor_core::models::differential::DifferentialResult;
use repertor_core::models::recommendation::Recommendation;
use repertor_core::models::record::CaseRecord;
use repertor_core::models::rubric::RepertoryResult;
use repertor_core::models::workflow::{Stage, WorkflowOutcome, WorkflowResult};
use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::completeness::CompletenessAnalyzer;
use crate::config::EngineConfig;
use crate::potency::{HIGH_CONFIDENCE, MODERATE_CONFIDENCE, PotencySelector};
use crate::reference::{ReferenceSource, ReferenceText, gather};
use crate::repertory::repertorize;
use crate::totality::TotalityScorer;

/// Confidence assumed by the pre-check, before any differential exists.
const PRE_CHECK_CONFIDENCE: f64 = 0.5;
/// Question texts carried by a clarification outcome.
const CLARIFICATION_QUESTIONS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Disable the pre- and post-check questioning gates.
    pub skip_gating: bool,
}

enum Transition {
    Advance(Stage),
    Finish(WorkflowOutcome),
}

/// Working data accumulated as stages run.
#[derive(Default)]
struct Run {
    repertory: RepertoryResult,
    references: Vec<ReferenceText>,
    differential: Option<DifferentialResult>,
}

/// Shares one immutable configuration across any number of analyses.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Arc<EngineConfig>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn from_shared(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Emergency phrases found in the record.
    pub fn screen(&self, record: &CaseRecord) -> Vec<String> {
        self.config.safety.screen(record)
    }

    pub fn repertorize(&self, record: &CaseRecord) -> RepertoryResult {
        repertorize(
            record,
            &self.config.rubrics,
            self.config.thresholds().max_candidates,
        )
    }

    pub fn completeness(&self, record: &CaseRecord) -> CompletenessReport {
        self.analyzer().analyze(record)
    }

    pub fn plan_questions(
        &self,
        record: &CaseRecord,
        candidates: &[String],
        confidence: f64,
    ) -> QuestionPlan {
        self.analyzer()
            .plan_questions(record, candidates, confidence)
    }

    fn analyzer(&self) -> CompletenessAnalyzer<'_> {
        CompletenessAnalyzer::new(&self.config.questions, self.config.thresholds())
    }

    fn scorer(&self) -> TotalityScorer {
        TotalityScorer {
            weights: self.config.settings.weights,
            depth: self.config.thresholds().differential_depth,
            require_reference_text: self.config.settings.require_reference_text,
        }
    }

    /// Run one record through every stage until a terminal outcome.
    ///
    /// Identical records and reference material always give identical
    /// results.
    pub fn analyze(
        &self,
        record: &CaseRecord,
        reference: &dyn ReferenceSource,
        options: AnalyzeOptions,
    ) -> WorkflowResult {
        let analysis_id = Uuid::new_v4();
        let span = info_span!("analysis", %analysis_id);
        let _guard = span.enter();

        let mut run = Run::default();
        let mut stages = Vec::new();
        let mut stage = Stage::SafetyScreen;

        let outcome = loop {
            stages.push(stage);
            match self.step(stage, record, reference, options, &mut run) {
                Transition::Advance(next) => {
                    debug_assert!(next > stage, "workflow stages only move forward");
                    stage = next;
                }
                Transition::Finish(outcome) => break outcome,
            }
        };

        info!(
            status = ?outcome.state(),
            stages = stages.len(),
            "analysis finished"
        );
        WorkflowResult { outcome, stages }
    }

    fn step(
        &self,
        stage: Stage,
        record: &CaseRecord,
        reference: &dyn ReferenceSource,
        options: AnalyzeOptions,
        run: &mut Run,
    ) -> Transition {
        let thresholds = self.config.thresholds();
        match stage {
            // 1. Emergency phrases halt everything else
            Stage::SafetyScreen => {
                let red_flags = self.screen(record);
                if red_flags.is_empty() {
                    Transition::Advance(Stage::Validate)
                } else {
                    Transition::Finish(WorkflowOutcome::Emergency {
                        red_flags,
                        message: messages::EMERGENCY.to_string(),
                        disclaimer: messages::DISCLAIMER.to_string(),
                    })
                }
            }

            Stage::Validate => {
                let missing_fields = record.missing_required_fields();
                if missing_fields.is_empty() {
                    Transition::Advance(Stage::Repertorize)
                } else {
                    Transition::Finish(WorkflowOutcome::Incomplete {
                        missing_fields,
                        message: messages::INCOMPLETE.to_string(),
                    })
                }
            }

            Stage::Repertorize => {
                run.repertory = self.repertorize(record);
                if run.repertory.is_empty() {
                    Transition::Finish(WorkflowOutcome::NoCandidates {
                        message: messages::NO_CANDIDATES.to_string(),
                    })
                } else {
                    Transition::Advance(Stage::RetrieveReference)
                }
            }

            // 2. Collaborator failures degrade to zero passages
            Stage::RetrieveReference => {
                run.references = gather(
                    reference,
                    run.repertory.top(thresholds.top_candidates),
                    &record.case_summary(),
                );
                debug!(
                    remedies = run.references.len(),
                    passages = run.references.iter().map(|r| r.passages.len()).sum::<usize>(),
                    "reference material gathered"
                );
                Transition::Advance(Stage::PreCheck)
            }

            Stage::PreCheck => {
                if !options.skip_gating {
                    let plan = self.plan_questions(
                        record,
                        &candidate_names(&run.repertory, thresholds.top_candidates),
                        PRE_CHECK_CONFIDENCE,
                    );
                    if plan.should_ask
                        && plan.completeness_score < thresholds.pre_check_min_completeness
                        && let Some(reason) = plan.reason
                    {
                        return Transition::Finish(WorkflowOutcome::NeedsMoreInformation {
                            reason,
                            completeness_score: plan.completeness_score,
                            questions: plan.questions,
                            message: reason.message().to_string(),
                        });
                    }
                }
                Transition::Advance(Stage::Differentiate)
            }

            Stage::Differentiate => {
                let result = self.scorer().score(
                    record,
                    run.repertory.top(thresholds.top_candidates),
                    &run.references,
                );
                let selected = result.selected.is_some();
                run.differential = Some(result);
                if selected {
                    Transition::Advance(Stage::PostCheck)
                } else {
                    Transition::Finish(WorkflowOutcome::InsufficientEvidence {
                        candidates: run.repertory.top(thresholds.top_candidates).to_vec(),
                        message: messages::INSUFFICIENT_EVIDENCE.to_string(),
                        disclaimer: messages::DISCLAIMER.to_string(),
                    })
                }
            }

            // 3. Close calls go back to the practitioner instead of prescribing
            Stage::PostCheck => {
                if !options.skip_gating
                    && let Some(result) = &run.differential
                    && let Some(selected) = &result.selected
                {
                    let mut ranked = vec![selected.remedy.clone()];
                    ranked.extend(result.differential.iter().map(|e| e.remedy.clone()));
                    let plan = self.plan_questions(record, &ranked, result.confidence);
                    if plan.should_ask
                        && result.confidence < thresholds.clarification_confidence
                        && let Some(reason) = plan.reason
                    {
                        return Transition::Finish(WorkflowOutcome::NeedsClarification {
                            reason,
                            completeness_score: plan.completeness_score,
                            confidence: result.confidence,
                            provisional_remedy: selected.remedy.clone(),
                            differential: result.differential.clone(),
                            questions: plan
                                .questions
                                .into_iter()
                                .take(CLARIFICATION_QUESTIONS)
                                .map(|q| q.question)
                                .collect(),
                            message: messages::NEEDS_CLARIFICATION.to_string(),
                        });
                    }
                }
                Transition::Advance(Stage::Prescribe)
            }

            Stage::Prescribe => match run.differential.take() {
                Some(DifferentialResult {
                    selected: Some(selected),
                    confidence,
                    differential,
                    reasoning,
                }) => {
                    let potency = PotencySelector::new(self.config.settings.potency_markers.clone())
                        .select(record, confidence);
                    let clinical_notes = clinical_notes(record, confidence, &run.references);
                    let message = format!("Prescription: {} {}", selected.remedy, potency.potency);
                    Transition::Finish(WorkflowOutcome::Complete {
                        recommendation: Recommendation {
                            remedy: selected.remedy,
                            potency,
                            confidence,
                            characteristic_symptoms: selected.characteristic_matches,
                            differential,
                            reasoning,
                            clinical_notes,
                        },
                        message,
                        disclaimer: messages::DISCLAIMER.to_string(),
                    })
                }
                _ => Transition::Finish(WorkflowOutcome::InsufficientEvidence {
                    candidates: run.repertory.top(thresholds.top_candidates).to_vec(),
                    message: messages::INSUFFICIENT_EVIDENCE.to_string(),
                    disclaimer: messages::DISCLAIMER.to_string(),
                }),
            },
        }
    }
}

fn candidate_names(repertory: &RepertoryResult, n: usize) -> Vec<String> {
    repertory.top(n).iter().map(|c| c.name.clone()).collect()
}

fn clinical_notes(record: &CaseRecord, confidence: f64, references: &[ReferenceText]) -> Vec<String> {
    let mut notes = vec![
        if confidence >= HIGH_CONFIDENCE {
            "High confidence prescription based on clear characteristic symptoms"
        } else if confidence >= MODERATE_CONFIDENCE {
            "Moderate confidence - observe response carefully"
        } else {
            "Low confidence - consider this as trial prescription, reassess after 5-7 days"
        }
        .to_string(),
        "Monitor in this order: 1) Mental/emotional state, 2) Energy/sleep/appetite, 3) Chief complaint"
            .to_string(),
        "Good response: improvement should follow Hering's Law (inside out, top to bottom, reverse order of appearance)"
            .to_string(),
    ];

    if record.red_flags.iter().any(|f| !f.trim().is_empty()) {
        notes.push("Intake red flags present - ensure appropriate medical supervision".to_string());
    }

    for unavailable in references.iter().filter(|r| !r.available) {
        notes.push(format!(
            "Reference material for {} was unavailable; ranking used rubric scores only",
            unavailable.remedy
        ));
    }
    if !references.is_empty() && references.iter().all(|r| r.passages.is_empty()) {
        notes.push("No reference passages were found for the leading candidates".to_string());
    }

    notes
}
