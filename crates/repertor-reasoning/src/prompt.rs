//! Prompt text for recommendation augmentation.

use repertor_core::models::recommendation::Recommendation;
use repertor_core::models::record::CaseRecord;

pub const SYSTEM_PROMPT: &str = "\
You support a classical homeopathy practitioner. The remedy and potency have \
already been chosen by a deterministic engine; do not propose a different \
remedy. Explain the choice, suggest monitoring points, and give general \
wellness advice. Never give emergency or diagnostic advice. \
Reply with JSON only.";

/// User message describing the recommendation and the case it came from.
pub fn build_user_message(record: &CaseRecord, recommendation: &Recommendation) -> String {
    let thermal = record.thermal.map(|t| t.as_str()).unwrap_or("N/A");
    format!(
        "# Clinical Analysis Complete\n\n\
         Selected Remedy: {remedy}\n\
         Potency: {potency}\n\
         Confidence: {confidence:.2}\n\
         Characteristic Symptoms: {characteristic}\n\n\
         # Case Summary\n\
         Presenting Complaint: {complaint}\n\
         Mental/Emotional: {mental}\n\
         Generals: {generals}\n\
         Thermal: {thermal}\n\
         Past History: {past}\n\
         Family History: {family}\n\
         Lifestyle: {lifestyle}\n\n\
         Please provide:\n\
         1. Detailed rationale for why {remedy} is indicated\n\
         2. Key monitoring points specific to this remedy\n\
         3. Wellness advice (diet, lifestyle, mental health) tailored to this case\n\
         4. Expected timeline for response\n\n\
         Return as JSON with fields: rationale (list), monitoring (list), \
         wellness_advice (list), expected_response (string)",
        remedy = recommendation.remedy,
        potency = recommendation.potency.potency,
        confidence = recommendation.confidence,
        characteristic = list_or_na(&recommendation.characteristic_symptoms),
        complaint = or_na(&record.presenting_complaint),
        mental = list_or_na(&record.mental_emotional),
        generals = list_or_na(&record.generals),
        past = list_or_na(&record.past_history),
        family = list_or_na(&record.family_history),
        lifestyle = list_or_na(&record.lifestyle),
    )
}

fn or_na(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { "N/A" } else { value }
}

fn list_or_na(items: &[String]) -> String {
    let joined = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "N/A".to_string()
    } else {
        joined
    }
}
