use std::sync::Mutex;

use repertor_core::models::recommendation::{
    CaseType, DosingProtocol, PotencySelection, Recommendation, Vitality,
};
use repertor_core::models::record::CaseRecord;
use repertor_reasoning::error::ReasoningError;
use repertor_reasoning::prompt::build_user_message;
use repertor_reasoning::{ReasoningService, augment};

struct Canned {
    reply: Result<String, String>,
    seen: Mutex<Vec<String>>,
}

impl Canned {
    fn ok(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: Err("connection refused".to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl ReasoningService for Canned {
    fn complete(&self, _system_prompt: &str, user_message: &str) -> Result<String, ReasoningError> {
        self.seen.lock().unwrap().push(user_message.to_string());
        self.reply.clone().map_err(ReasoningError::Invocation)
    }
}

fn recommendation() -> Recommendation {
    Recommendation {
        remedy: "Arsenicum".to_string(),
        potency: PotencySelection::from_protocol(
            CaseType::Chronic,
            Vitality::Moderate,
            DosingProtocol::ChronicDeep,
        ),
        confidence: 0.9,
        characteristic_symptoms: vec!["Mental: anxious".to_string(), "General: cold".to_string()],
        differential: Vec::new(),
        reasoning: "Selected based on 2 characteristic symptoms".to_string(),
        clinical_notes: Vec::new(),
    }
}

fn record() -> CaseRecord {
    CaseRecord {
        presenting_complaint: "burning pains".to_string(),
        mental_emotional: vec!["anxious".to_string()],
        ..Default::default()
    }
}

#[test]
fn prompt_describes_recommendation_and_case() {
    let message = build_user_message(&record(), &recommendation());
    assert!(message.contains("Selected Remedy: Arsenicum"));
    assert!(message.contains("Potency: 200C"));
    assert!(message.contains("Confidence: 0.90"));
    assert!(message.contains("Characteristic Symptoms: Mental: anxious, General: cold"));
    assert!(message.contains("Presenting Complaint: burning pains"));
    assert!(message.contains("Generals: N/A"));
    assert!(message.contains("Thermal: N/A"));
}

#[test]
fn successful_reply_is_returned() {
    let service = Canned::ok("```json\n{\"rationale\": [\"anxiety with restlessness\"]}\n```");
    let augmentation = augment(&service, &record(), &recommendation()).unwrap();
    assert_eq!(augmentation.rationale, vec!["anxiety with restlessness"]);
    assert_eq!(service.seen.lock().unwrap().len(), 1);
}

#[test]
fn service_failure_yields_none() {
    assert!(augment(&Canned::failing(), &record(), &recommendation()).is_none());
}

#[test]
fn unparseable_reply_yields_none() {
    let service = Canned::ok("Sorry, I can't do that.");
    assert!(augment(&service, &record(), &recommendation()).is_none());
}
