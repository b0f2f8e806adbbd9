//! Recommendation augmentation.

use repertor_core::models::recommendation::Recommendation;
use repertor_core::models::record::CaseRecord;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::ReasoningService;
use crate::error::ReasoningError;
use crate::parse::parse_reply;
use crate::prompt::{SYSTEM_PROMPT, build_user_message};

/// Human-readable material generated around a recommendation. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Augmentation {
    #[serde(deserialize_with = "text_list")]
    pub rationale: Vec<String>,
    #[serde(deserialize_with = "text_list")]
    pub monitoring: Vec<String>,
    #[serde(deserialize_with = "text_list")]
    pub wellness_advice: Vec<String>,
    pub expected_response: Option<String>,
}

impl Augmentation {
    pub fn is_empty(&self) -> bool {
        self.rationale.is_empty()
            && self.monitoring.is_empty()
            && self.wellness_advice.is_empty()
            && self.expected_response.is_none()
    }
}

/// Models return either a list of strings or a single string.
fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextList {
        Many(Vec<String>),
        One(String),
        Nothing(()),
    }

    Ok(match TextList::deserialize(deserializer)? {
        TextList::Many(items) => items,
        TextList::One(text) if !text.trim().is_empty() => vec![text],
        TextList::One(_) | TextList::Nothing(()) => Vec::new(),
    })
}

pub fn parse_augmentation(reply: &str) -> Result<Augmentation, ReasoningError> {
    let augmentation: Augmentation = parse_reply(reply)?;
    if augmentation.is_empty() {
        return Err(ReasoningError::SchemaViolation(
            "reply carried none of the expected fields".to_string(),
        ));
    }
    Ok(augmentation)
}

/// Ask the service to explain `recommendation`. Any failure is logged and
/// yields `None`.
pub fn augment(
    service: &dyn ReasoningService,
    record: &CaseRecord,
    recommendation: &Recommendation,
) -> Option<Augmentation> {
    let user_message = build_user_message(record, recommendation);
    let result = service
        .complete(SYSTEM_PROMPT, &user_message)
        .and_then(|reply| parse_augmentation(&reply));
    match result {
        Ok(augmentation) => {
            info!(remedy = %recommendation.remedy, "recommendation augmented");
            Some(augmentation)
        }
        Err(e) => {
            warn!(error = %e, "augmentation unavailable; returning engine result only");
            None
        }
    }
}
