//! Totality scoring and differential ranking.
//!
//! Each leading candidate is compared against its reference text along seven
//! symptom categories weighted by a fixed hierarchy (mental/emotional highest,
//! particulars lowest). Ranking is driven first by characteristic matches:
//! high-specificity symptoms (mental/emotional, thermal state, causation)
//! found literally in both the record and the reference text.

use repertor_core::models::differential::{CategoryScores, DifferentialEntry, DifferentialResult};
use repertor_core::models::record::{CaseRecord, ThermalState, non_blank};
use repertor_core::models::rubric::OutcomeCandidate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reference::{ReferenceText, text_for};
use crate::text::{BlobScope, contains_phrase, record_blob};

/// Confidence reported when only one candidate exists.
pub const SINGLE_CANDIDATE_CONFIDENCE: f64 = 0.7;

/// Keyword families used to match causation when wording differs.
const CAUSATION_FAMILIES: &[&[&str]] = &[
    &["grief", "loss", "disappointment", "bereavement"],
    &["anger", "indignation", "rage", "suppressed anger"],
    &["fright", "shock", "fear", "trauma"],
    &["cold", "exposure", "draft", "chill"],
    &["injury", "trauma", "accident", "fall"],
];

/// Chronic-pattern (miasmatic) layer: pattern name and its indicators.
const PATTERN_INDICATORS: &[(&str, &[&str])] = &[
    ("psora", &["itching", "suppression", "functional", "deficiency"]),
    ("sycosis", &["overgrowth", "warts", "tumors", "excess"]),
    ("syphilis", &["destruction", "ulceration", "deformity", "night aggravation"]),
    ("tubercular", &["weakness", "emaciation", "restlessness", "changing symptoms"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalityWeights {
    pub mental_emotional: f64,
    pub generals: f64,
    pub causation: f64,
    pub modalities: f64,
    pub particulars: f64,
    pub constitutional: f64,
    pub pattern_layer: f64,
}

impl Default for TotalityWeights {
    fn default() -> Self {
        Self {
            mental_emotional: 10.0,
            generals: 7.0,
            causation: 8.0,
            modalities: 5.0,
            particulars: 3.0,
            constitutional: 6.0,
            pattern_layer: 4.0,
        }
    }
}

impl TotalityWeights {
    pub fn weigh(&self, scores: &CategoryScores) -> f64 {
        scores.mental_emotional * self.mental_emotional
            + scores.generals * self.generals
            + scores.causation * self.causation
            + scores.modalities * self.modalities
            + scores.particulars * self.particulars
            + scores.constitutional * self.constitutional
            + scores.pattern_layer * self.pattern_layer
    }

    pub fn all(&self) -> [f64; 7] {
        [
            self.mental_emotional,
            self.generals,
            self.causation,
            self.modalities,
            self.particulars,
            self.constitutional,
            self.pattern_layer,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct TotalityScorer {
    pub weights: TotalityWeights,
    /// How many leading candidates are compared.
    pub depth: usize,
    /// Drop candidates that have no reference passages.
    pub require_reference_text: bool,
}

impl Default for TotalityScorer {
    fn default() -> Self {
        Self {
            weights: TotalityWeights::default(),
            depth: 3,
            require_reference_text: false,
        }
    }
}

impl TotalityScorer {
    /// Rank the leading candidates and select one.
    ///
    /// With a single candidate the selection is automatic at confidence 0.7;
    /// with none, nothing is selected at confidence 0.0. Identical inputs
    /// always produce the identical ranking.
    pub fn score(
        &self,
        record: &CaseRecord,
        candidates: &[OutcomeCandidate],
        references: &[ReferenceText],
    ) -> DifferentialResult {
        if candidates.is_empty() {
            return DifferentialResult::none();
        }

        let blob = record_blob(record, BlobScope::Clinical);

        let mut ranked: Vec<(usize, DifferentialEntry)> = candidates
            .iter()
            .take(self.depth.max(1))
            .map(|c| self.entry(record, &blob, c, references))
            .filter(|e| !self.require_reference_text || e.reference_passages > 0)
            .enumerate()
            .collect();

        if ranked.is_empty() {
            return DifferentialResult {
                selected: None,
                confidence: 0.0,
                differential: Vec::new(),
                reasoning: "No reference material supports the leading candidates".to_string(),
            };
        }

        if candidates.len() == 1 {
            return DifferentialResult {
                selected: ranked.pop().map(|(_, entry)| entry),
                confidence: SINGLE_CANDIDATE_CONFIDENCE,
                differential: Vec::new(),
                reasoning: "Single clear indication".to_string(),
            };
        }

        ranked.sort_by(|(ia, a), (ib, b)| {
            b.characteristic_match_count
                .cmp(&a.characteristic_match_count)
                .then(b.score.total_cmp(&a.score))
                .then(b.totality.total_cmp(&a.totality))
                .then(ia.cmp(ib))
        });

        let mut entries = ranked.into_iter().map(|(_, e)| e);
        let Some(best) = entries.next() else {
            return DifferentialResult::none();
        };
        let differential: Vec<DifferentialEntry> = entries.collect();

        let confidence = confidence(
            best.characteristic_match_count,
            differential.first().map(|e| e.characteristic_match_count),
        );

        debug!(
            remedy = %best.remedy,
            matches = best.characteristic_match_count,
            confidence,
            "differential ranked"
        );

        DifferentialResult {
            reasoning: format!(
                "Selected based on {} characteristic symptoms",
                best.characteristic_match_count
            ),
            selected: Some(best),
            confidence,
            differential,
        }
    }

    fn entry(
        &self,
        record: &CaseRecord,
        blob: &str,
        candidate: &OutcomeCandidate,
        references: &[ReferenceText],
    ) -> DifferentialEntry {
        let (text, passages) = text_for(references, &candidate.name);
        let categories = category_scores(record, &text, blob);
        let characteristic = characteristic_matches(record, &text);
        let mut reasons = candidate.reasons.clone();
        reasons.extend(characteristic.iter().cloned());
        reasons.extend(
            categories
                .labelled()
                .into_iter()
                .filter(|(_, fraction)| *fraction > 0.0)
                .map(|(label, fraction)| {
                    format!("Reference supports {label} ({:.0}%)", fraction * 100.0)
                }),
        );
        DifferentialEntry {
            remedy: candidate.name.clone(),
            score: candidate.score,
            totality: self.weights.weigh(&categories),
            characteristic_match_count: characteristic.len(),
            characteristic_matches: characteristic,
            categories,
            reasons,
            reference_passages: passages,
        }
    }
}

/// `min(1, matches/5) + min(0.3, gap/3)`, capped at 1 and rounded to two
/// decimals. Without a runner-up the gap bonus is the full 0.3.
pub fn confidence(best_matches: usize, runner_up_matches: Option<usize>) -> f64 {
    let match_confidence = (best_matches as f64 / 5.0).min(1.0);
    let gap_confidence = match runner_up_matches {
        Some(runner_up) => (best_matches.saturating_sub(runner_up) as f64 / 3.0).min(0.3),
        None => 0.3,
    };
    round2((match_confidence + gap_confidence).clamp(0.0, 1.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Literal occurrences of mental/emotional symptoms, thermal state, and
/// etiology in the reference text.
pub fn characteristic_matches(record: &CaseRecord, reference_lower: &str) -> Vec<String> {
    let mut matches = Vec::new();
    for mental in &record.mental_emotional {
        if contains_phrase(reference_lower, mental) {
            matches.push(format!("Mental: {}", mental.trim()));
        }
    }
    if let Some(thermal) = record.thermal
        && let Some(term) = thermal_term(reference_lower, thermal)
    {
        matches.push(format!("General: {term}"));
    }
    if let Some(etiology) = record.etiology_text()
        && contains_phrase(reference_lower, etiology)
    {
        matches.push(format!("Causation: {etiology}"));
    }
    matches
}

/// First word for `thermal` found in the text.
fn thermal_term(reference_lower: &str, thermal: ThermalState) -> Option<&'static str> {
    thermal
        .terms()
        .iter()
        .copied()
        .find(|term| contains_phrase(reference_lower, term))
}

/// Per-category match fractions of the record against one reference text.
pub fn category_scores(record: &CaseRecord, reference_lower: &str, case_blob: &str) -> CategoryScores {
    if reference_lower.trim().is_empty() {
        return CategoryScores::default();
    }
    CategoryScores {
        mental_emotional: mental_score(&record.mental_emotional, reference_lower),
        generals: generals_score(record, reference_lower),
        causation: causation_score(record.etiology_text(), reference_lower),
        modalities: fraction(
            record.particulars.iter().flat_map(|p| {
                p.modalities_better.iter().chain(p.modalities_worse.iter())
            }),
            reference_lower,
        ),
        particulars: fraction(
            record.particulars.iter().map(|p| &p.description),
            reference_lower,
        ),
        constitutional: fraction(
            record
                .lifestyle
                .iter()
                .chain(&record.dreams)
                .chain(&record.past_history)
                .chain(&record.family_history),
            reference_lower,
        ),
        pattern_layer: pattern_score(case_blob, reference_lower),
    }
}

/// A symptom matches when any of its words longer than three characters
/// occurs in the text.
fn mental_score(symptoms: &[String], text: &str) -> f64 {
    let total = non_blank(symptoms);
    if total == 0 {
        return 0.0;
    }
    let matched = symptoms
        .iter()
        .filter(|s| {
            s.to_lowercase()
                .split_whitespace()
                .any(|word| word.chars().count() > 3 && text.contains(word))
        })
        .count();
    matched as f64 / total as f64
}

/// Thermal state, generals, cravings, and aversions count fully; sleep
/// symptoms count half.
fn generals_score(record: &CaseRecord, text: &str) -> f64 {
    let mut score = 0.0;
    let mut count = 0usize;

    if let Some(thermal) = record.thermal {
        count += 1;
        if thermal_term(text, thermal).is_some() {
            score += 1.0;
        }
    }
    for item in record
        .generals
        .iter()
        .chain(&record.cravings)
        .chain(&record.aversions)
        .filter(|s| !s.trim().is_empty())
    {
        count += 1;
        if contains_phrase(text, item) {
            score += 1.0;
        }
    }
    for item in record.sleep.iter().filter(|s| !s.trim().is_empty()) {
        count += 1;
        if contains_phrase(text, item) {
            score += 0.5;
        }
    }

    if count == 0 { 0.0 } else { score / count as f64 }
}

fn causation_score(etiology: Option<&str>, text: &str) -> f64 {
    let Some(etiology) = etiology else {
        return 0.0;
    };
    if contains_phrase(text, etiology) {
        return 1.0;
    }
    let etiology = etiology.to_lowercase();
    let shared_family = CAUSATION_FAMILIES.iter().any(|family| {
        family.iter().any(|kw| etiology.contains(kw)) && family.iter().any(|kw| text.contains(kw))
    });
    if shared_family { 1.0 } else { 0.0 }
}

/// Share of the patterns active in the case that the reference text also
/// names.
fn pattern_score(case_blob: &str, text: &str) -> f64 {
    let active: Vec<&(&str, &[&str])> = PATTERN_INDICATORS
        .iter()
        .filter(|(_, indicators)| indicators.iter().any(|i| case_blob.contains(i)))
        .collect();
    if active.is_empty() {
        return 0.0;
    }
    let supported = active
        .iter()
        .filter(|(name, indicators)| {
            text.contains(name) || indicators.iter().any(|i| text.contains(i))
        })
        .count();
    supported as f64 / active.len() as f64
}

fn fraction<'a>(items: impl Iterator<Item = &'a String>, text: &str) -> f64 {
    let mut total = 0usize;
    let mut matched = 0usize;
    for item in items.filter(|s| !s.trim().is_empty()) {
        total += 1;
        if contains_phrase(text, item) {
            matched += 1;
        }
    }
    if total == 0 { 0.0 } else { matched as f64 / total as f64 }
}
