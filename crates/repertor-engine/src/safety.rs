//! Emergency red-flag screen.
//!
//! Scans the whole record for a fixed set of emergency phrases. A non-empty
//! result halts the workflow before any scoring runs.
//!
//! This is an advisory net, not a clinical safety certification. It only
//! recognizes the configured phrases as written, so a record describing an
//! emergency in other words passes the screen. Callers must not present a
//! clean screen as evidence that the case is safe.

use repertor_core::models::record::CaseRecord;
use tracing::warn;

use crate::error::ConfigError;
use crate::text::{BlobScope, contains_phrase, record_blob};

pub const DEFAULT_RED_FLAGS: &[&str] = &[
    "severe chest pain",
    "difficulty breathing",
    "shortness of breath",
    "stroke",
    "paralysis",
    "suicidal",
    "persistent high fever",
    "acute abdomen",
    "severe dyspnea",
];

#[derive(Debug, Clone)]
pub struct SafetyGate {
    phrases: Vec<String>,
}

impl SafetyGate {
    /// Build a gate from phrases. Blank phrases are dropped; an empty list is
    /// a configuration defect.
    pub fn new<I, S>(phrases: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref().trim().to_lowercase();
            if !phrase.is_empty() && !normalized.contains(&phrase) {
                normalized.push(phrase);
            }
        }
        if normalized.is_empty() {
            return Err(ConfigError::EmptyRedFlags);
        }
        Ok(Self { phrases: normalized })
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Matched phrases, in configured order.
    pub fn screen(&self, record: &CaseRecord) -> Vec<String> {
        let blob = record_blob(record, BlobScope::Full);
        let flags: Vec<String> = self
            .phrases
            .iter()
            .filter(|phrase| contains_phrase(&blob, phrase))
            .cloned()
            .collect();
        if !flags.is_empty() {
            warn!(flags = ?flags, "red flags found in case record");
        }
        flags
    }
}

impl Default for SafetyGate {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_RED_FLAGS.iter().map(|p| p.to_string()).collect(),
        }
    }
}
