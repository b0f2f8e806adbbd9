mod common;

use common::{complaint, full_record, strings};
use repertor_core::models::record::Particular;
use repertor_engine::error::ConfigError;
use repertor_engine::safety::{DEFAULT_RED_FLAGS, SafetyGate};

#[test]
fn clean_record_passes() {
    assert!(SafetyGate::default().screen(&full_record()).is_empty());
}

#[test]
fn phrase_in_complaint_is_flagged() {
    let flags = SafetyGate::default().screen(&complaint("Severe Chest Pain since morning"));
    assert_eq!(flags, vec!["severe chest pain"]);
}

#[test]
fn phrase_inside_particular_concomitant_is_flagged() {
    let mut record = complaint("headache");
    record.particulars.push(Particular {
        description: "head pain".to_string(),
        concomitants: strings(&["some difficulty breathing at night"]),
        ..Default::default()
    });
    assert_eq!(
        SafetyGate::default().screen(&record),
        vec!["difficulty breathing"]
    );
}

#[test]
fn multiple_flags_reported_in_configured_order() {
    let mut record = complaint("feels suicidal");
    record.generals = strings(&["shortness of breath on stairs"]);
    let flags = SafetyGate::default().screen(&record);
    assert_eq!(flags, vec!["shortness of breath", "suicidal"]);
}

#[test]
fn substring_match_is_intentionally_crude() {
    // "stroke" matches inside "heatstroke"
    let flags = SafetyGate::default().screen(&complaint("recovering from heatstroke"));
    assert_eq!(flags, vec!["stroke"]);
}

#[test]
fn custom_phrases_are_normalized_and_deduplicated() {
    let gate = SafetyGate::new(["  Fainting ", "fainting", "", "Blue Lips"]).unwrap();
    assert_eq!(gate.phrases(), &["fainting", "blue lips"]);
    assert_eq!(gate.screen(&complaint("episodes of FAINTING")), vec!["fainting"]);
}

#[test]
fn empty_phrase_list_is_rejected() {
    let err = SafetyGate::new(Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyRedFlags));

    let err = SafetyGate::new(["   "]).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyRedFlags));
}

#[test]
fn default_gate_carries_builtin_phrases() {
    assert_eq!(SafetyGate::default().phrases().len(), DEFAULT_RED_FLAGS.len());
}
