//! Case completeness scoring and follow-up question planning.

use repertor_core::models::completeness::{
    AskReason, CompletenessGap, CompletenessReport, PrioritizedQuestion, QuestionKind,
    QuestionPlan, QuestionPriority,
};
use repertor_core::models::record::{CaseRecord, non_blank};

use crate::config::Thresholds;
use crate::questions::{CategoryConfig, CategorySource, QuestionBank};
use crate::text::{BlobScope, clinical_items, record_blob, word_tokens};

const DISCHARGE_MARKERS: &[&str] = &[
    "discharge",
    "mucus",
    "catarrh",
    "pus",
    "expectoration",
    "sputum",
    "leucorrh",
    "coryza",
];

const MENSTRUAL_MARKERS: &[&str] = &[
    "menses",
    "menstrua",
    "period",
    "dysmenorr",
    "pms",
    "cycle",
];

/// Gaps that contribute priority questions.
const PRIORITY_GAPS: usize = 5;
const QUESTIONS_PER_GAP: usize = 2;
const MAX_PRIORITY_QUESTIONS: usize = 10;
/// Extra questions offered per gap beyond the number of missing items.
const GAP_QUESTION_MARGIN: usize = 2;

const MAX_PLAN_QUESTIONS: usize = 10;
const ESSENTIAL_TAKE: usize = 5;
const DIFFERENTIAL_TAKE: usize = 3;
const MODALITY_TAKE: usize = 4;
const CLARIFICATION_TAKE: usize = 3;
const CONSTITUTIONAL_TAKE: usize = 2;
const MIN_RECORDED_MODALITIES: usize = 3;
const MAX_CLARIFICATIONS: usize = 8;
const COMPLAINT_CLARIFICATIONS: usize = 3;
const PARTICULAR_CLARIFICATIONS: usize = 2;

pub struct CompletenessAnalyzer<'a> {
    bank: &'a QuestionBank,
    thresholds: &'a Thresholds,
}

impl<'a> CompletenessAnalyzer<'a> {
    pub fn new(bank: &'a QuestionBank, thresholds: &'a Thresholds) -> Self {
        Self { bank, thresholds }
    }

    /// Weighted coverage of the applicable categories and the gaps, heaviest
    /// first.
    pub fn analyze(&self, record: &CaseRecord) -> CompletenessReport {
        let blob = record_blob(record, BlobScope::Clinical);

        let mut total_weight = 0.0;
        let mut achieved = 0.0;
        let mut gaps = Vec::new();

        for category in self.bank.categories.iter().filter(|c| applies(c, record)) {
            let count = category_count(record, category.source, &blob);
            let weight = f64::from(category.weight);
            total_weight += weight;
            achieved += weight * (count as f64 / category.min_required as f64).min(1.0);

            if count < category.min_required {
                let needed = category.min_required - count;
                gaps.push(CompletenessGap {
                    category: category.name.clone(),
                    weight: category.weight,
                    current_count: count,
                    needed,
                    questions: category
                        .questions
                        .iter()
                        .take(needed + GAP_QUESTION_MARGIN)
                        .cloned()
                        .collect(),
                });
            }
        }

        // Stable, so equal weights keep bank order.
        gaps.sort_by(|a, b| b.weight.cmp(&a.weight));

        let score = if total_weight > 0.0 {
            achieved / total_weight
        } else {
            0.0
        };

        let priority_questions: Vec<String> = gaps
            .iter()
            .take(PRIORITY_GAPS)
            .flat_map(|gap| gap.questions.iter().take(QUESTIONS_PER_GAP).cloned())
            .take(MAX_PRIORITY_QUESTIONS)
            .collect();

        let ready_to_proceed = gaps.len() <= self.thresholds.max_ready_gaps
            && score >= self.thresholds.ready_min_completeness;

        CompletenessReport {
            score,
            gaps,
            priority_questions,
            ready_to_proceed,
        }
    }

    /// Decide whether to ask before prescribing, and what.
    ///
    /// `candidates` are remedy names in rank order.
    pub fn plan_questions(
        &self,
        record: &CaseRecord,
        candidates: &[String],
        confidence: f64,
    ) -> QuestionPlan {
        let completeness = self.analyze(record);
        let close_candidates =
            candidates.len() >= 2 && confidence < self.thresholds.clarification_confidence;

        let mut questions = Vec::new();
        let mut push = |texts: &[String], take: usize, kind, priority| {
            questions.extend(texts.iter().take(take).map(|q| PrioritizedQuestion {
                question: q.clone(),
                kind,
                priority,
            }));
        };

        if !completeness.ready_to_proceed {
            push(
                &completeness.priority_questions,
                ESSENTIAL_TAKE,
                QuestionKind::Essential,
                QuestionPriority::High,
            );
        }
        if close_candidates {
            push(
                self.bank.differential_questions(&candidates[0], &candidates[1]),
                DIFFERENTIAL_TAKE,
                QuestionKind::Differential,
                QuestionPriority::High,
            );
        }
        if record.modality_count() < MIN_RECORDED_MODALITIES {
            push(
                &self.bank.modality_questions,
                MODALITY_TAKE,
                QuestionKind::Modality,
                QuestionPriority::Medium,
            );
        }
        push(
            &self.symptom_clarifications(record),
            CLARIFICATION_TAKE,
            QuestionKind::Clarification,
            QuestionPriority::Medium,
        );
        push(
            &self.bank.constitutional_questions,
            CONSTITUTIONAL_TAKE,
            QuestionKind::Constitutional,
            QuestionPriority::Low,
        );
        questions.truncate(MAX_PLAN_QUESTIONS);

        let reason = if completeness.score < self.thresholds.pre_check_min_completeness {
            Some(AskReason::InsufficientInformation)
        } else if close_candidates {
            Some(AskReason::DifferentiateCandidates)
        } else if !completeness.ready_to_proceed {
            Some(AskReason::EssentialCategoriesIncomplete)
        } else {
            None
        };

        QuestionPlan {
            should_ask: reason.is_some(),
            reason,
            completeness_score: completeness.score,
            questions,
            completeness,
        }
    }

    /// Clarifications for symptom keywords in the complaint and in
    /// particulars, first occurrence kept.
    pub fn symptom_clarifications(&self, record: &CaseRecord) -> Vec<String> {
        let complaint = record.presenting_complaint.to_lowercase();
        let mut found: Vec<String> = Vec::new();

        for clarification in &self.bank.symptom_clarifications {
            if complaint.contains(&clarification.keyword.to_lowercase()) {
                found.extend(
                    clarification
                        .questions
                        .iter()
                        .take(COMPLAINT_CLARIFICATIONS)
                        .cloned(),
                );
            }
        }
        for particular in &record.particulars {
            let description = particular.description.to_lowercase();
            for clarification in &self.bank.symptom_clarifications {
                if description.contains(&clarification.keyword.to_lowercase()) {
                    found.extend(
                        clarification
                            .questions
                            .iter()
                            .take(PARTICULAR_CLARIFICATIONS)
                            .cloned(),
                    );
                }
            }
        }

        let mut unique: Vec<String> = Vec::new();
        for question in found {
            if !unique.contains(&question) {
                unique.push(question);
            }
        }
        unique.truncate(MAX_CLARIFICATIONS);
        unique
    }
}

fn applies(category: &CategoryConfig, record: &CaseRecord) -> bool {
    match category.applicable_to {
        Some(sex) => record.sex == Some(sex),
        None => true,
    }
}

/// Items the record holds for one category. `blob` is the lowercase clinical
/// text of the record.
pub fn category_count(record: &CaseRecord, source: CategorySource, blob: &str) -> usize {
    match source {
        CategorySource::MentalEmotional => non_blank(&record.mental_emotional),
        CategorySource::Generals => non_blank(&record.generals),
        CategorySource::Thermal => usize::from(record.thermal.is_some()),
        CategorySource::Modalities => record.modality_count(),
        CategorySource::FoodPreferences => non_blank(&record.cravings) + non_blank(&record.aversions),
        CategorySource::Sleep => non_blank(&record.sleep),
        CategorySource::Dreams => non_blank(&record.dreams),
        CategorySource::Causation => usize::from(record.etiology_text().is_some()),
        CategorySource::Laterality => {
            let mut sides: Vec<&str> = word_tokens(blob)
                .filter(|w| *w == "left" || *w == "right")
                .collect();
            sides.sort_unstable();
            sides.dedup();
            sides.len()
        }
        CategorySource::Discharges => marked_items(record, DISCHARGE_MARKERS),
        CategorySource::Menstrual => marked_items(record, MENSTRUAL_MARKERS),
        CategorySource::PastHistory => non_blank(&record.past_history),
        CategorySource::FamilyHistory => non_blank(&record.family_history),
        CategorySource::Lifestyle => non_blank(&record.lifestyle),
    }
}

fn marked_items(record: &CaseRecord, markers: &[&str]) -> usize {
    clinical_items(record)
        .into_iter()
        .filter(|item| {
            let item = item.to_lowercase();
            markers.iter().any(|m| item.contains(m))
        })
        .count()
}
