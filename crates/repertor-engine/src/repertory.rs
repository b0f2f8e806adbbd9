//! Repertorization: weighted keyword rubrics to candidate remedies.

use std::collections::{HashMap, HashSet};

use repertor_core::models::record::CaseRecord;
use repertor_core::models::rubric::{OutcomeCandidate, RepertoryResult, Rubric, RubricHit};
use tracing::debug;

use crate::error::ConfigError;
use crate::text::{BlobScope, record_blob};

/// Validated, immutable rubric table.
#[derive(Debug, Clone)]
pub struct RubricTable {
    rubrics: Vec<Rubric>,
}

impl RubricTable {
    /// Normalizes keywords and outcomes and rejects malformed rows.
    pub fn new(rubrics: Vec<Rubric>) -> Result<Self, ConfigError> {
        if rubrics.is_empty() {
            return Err(ConfigError::EmptyRubricTable);
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(rubrics.len());
        for (row, rubric) in rubrics.into_iter().enumerate() {
            let name = rubric.name.trim().to_string();
            if name.is_empty() {
                return Err(ConfigError::UnnamedRubric(row + 1));
            }
            if rubric.weight == 0 {
                return Err(ConfigError::InvalidWeight {
                    rubric: name,
                    weight: 0,
                });
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(ConfigError::DuplicateRubric(name));
            }

            let keywords = dedup(rubric.keywords.iter().map(|k| k.trim().to_lowercase()));
            if keywords.is_empty() {
                return Err(ConfigError::NoKeywords(name));
            }
            let outcomes = dedup(rubric.outcomes.iter().map(|o| o.trim().to_string()));
            if outcomes.is_empty() {
                return Err(ConfigError::NoOutcomes(name));
            }

            normalized.push(Rubric {
                name,
                weight: rubric.weight,
                keywords,
                outcomes,
            });
        }

        Ok(Self { rubrics: normalized })
    }

    pub fn rubrics(&self) -> &[Rubric] {
        &self.rubrics
    }

    pub fn len(&self) -> usize {
        self.rubrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rubrics.is_empty()
    }
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Match the record against every rubric and rank remedies by accumulated
/// weight.
///
/// A rubric hits when any of its keywords is a substring of the clinical
/// text. Each hit adds the rubric's full weight to every one of its remedies;
/// weights are not split. Equal scores keep the order in which remedies first
/// received weight. At most `max_candidates` are returned, with `reasons`
/// left empty for the totality scorer.
pub fn repertorize(record: &CaseRecord, table: &RubricTable, max_candidates: usize) -> RepertoryResult {
    let text = record_blob(record, BlobScope::Clinical);

    let mut hits = Vec::new();
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for rubric in table.rubrics() {
        let matched: Vec<String> = rubric
            .keywords
            .iter()
            .filter(|k| text.contains(k.as_str()))
            .cloned()
            .collect();
        if matched.is_empty() {
            continue;
        }

        for outcome in &rubric.outcomes {
            match index.get(outcome) {
                Some(&i) => order[i].1 += u64::from(rubric.weight),
                None => {
                    index.insert(outcome.clone(), order.len());
                    order.push((outcome.clone(), u64::from(rubric.weight)));
                }
            }
        }

        hits.push(RubricHit {
            rubric: rubric.name.clone(),
            weight: rubric.weight,
            outcomes: rubric.outcomes.clone(),
            matched_keywords: matched,
        });
    }

    // Stable sort keeps first-seen order among equal scores.
    order.sort_by(|a, b| b.1.cmp(&a.1));

    let candidates: Vec<OutcomeCandidate> = order
        .into_iter()
        .take(max_candidates)
        .map(|(name, score)| OutcomeCandidate {
            name,
            score: score as f64,
            reasons: Vec::new(),
        })
        .collect();

    debug!(
        hits = hits.len(),
        candidates = candidates.len(),
        "repertorization complete"
    );

    RepertoryResult { hits, candidates }
}
