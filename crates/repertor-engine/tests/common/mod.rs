#![allow(dead_code)]

use repertor_core::models::record::{CaseRecord, Particular, ThermalState};
use repertor_core::models::rubric::Rubric;
use repertor_engine::reference::{CorpusDocument, StaticCorpus};
use repertor_engine::repertory::RubricTable;
use repertor_engine::{Engine, EngineConfig};

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn rubric(name: &str, weight: u32, keywords: &[&str], outcomes: &[&str]) -> Rubric {
    Rubric {
        name: name.to_string(),
        weight,
        keywords: strings(keywords),
        outcomes: strings(outcomes),
    }
}

pub fn sample_table() -> RubricTable {
    RubricTable::new(vec![
        rubric("burning-worse-heat", 8, &["burning", "worse heat"], &["Arsenicum"]),
        rubric("anxiety-restless", 6, &["anxious", "restless"], &["Arsenicum", "Rhus Tox"]),
        rubric("weeping-consolation", 5, &["weeping", "consolation"], &["Pulsatilla", "Natrum Mur"]),
        rubric("irritable-chilly", 4, &["irritable"], &["Nux Vomica"]),
    ])
    .unwrap()
}

pub fn engine() -> Engine {
    Engine::new(EngineConfig::with_rubrics(sample_table()).unwrap())
}

pub fn complaint(text: &str) -> CaseRecord {
    CaseRecord {
        presenting_complaint: text.to_string(),
        ..Default::default()
    }
}

/// A record meeting every completeness category a non-female record is
/// scored on.
pub fn full_record() -> CaseRecord {
    CaseRecord {
        case_id: Some("case-001".to_string()),
        presenting_complaint: "burning pains in stomach".to_string(),
        onset: Some("gradual".to_string()),
        duration: Some("two years".to_string()),
        etiology: Some("grief".to_string()),
        mental_emotional: strings(&["anxious about health", "restless at night", "fastidious"]),
        cravings: strings(&["sips of water"]),
        aversions: strings(&["sight of food"]),
        sleep: strings(&["restless sleep", "wakes after midnight"]),
        past_history: strings(&["eczema treated with cream"]),
        thermal: Some(ThermalState::Cold),
        particulars: vec![Particular {
            section: Some("abdomen".to_string()),
            description: "burning on the right side".to_string(),
            modalities_better: strings(&["warmth", "warm drinks"]),
            modalities_worse: strings(&["midnight"]),
            concomitants: strings(&["watery nasal discharge"]),
        }],
        ..Default::default()
    }
}

pub fn arsenicum_corpus() -> StaticCorpus {
    StaticCorpus::new(
        vec![CorpusDocument {
            id: "arsenicum.md".to_string(),
            title: "Arsenicum".to_string(),
            text: "Arsenicum: anxious about health, restless at night, fastidious. \
                   Chilly and cold, better from warmth. Complaints after grief."
                .to_string(),
        }],
        2,
    )
}
