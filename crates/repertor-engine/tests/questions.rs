use repertor_engine::error::ConfigError;
use repertor_engine::questions::{QuestionBank, pair_key};

#[test]
fn builtin_bank_is_valid() {
    let bank = QuestionBank::builtin();
    bank.validate().unwrap();
    assert_eq!(bank.categories.len(), 10);
    assert_eq!(bank.differential_pairs.len(), 5);
}

#[test]
fn pair_lookup_ignores_order_and_spacing() {
    let bank = QuestionBank::builtin();
    let forward = bank.differential_questions("Nux Vomica", "Lycopodium");
    let reverse = bank.differential_questions("lycopodium", " nux vomica ");
    assert_eq!(forward, reverse);
    assert_eq!(
        forward[0],
        "What time of day are symptoms worst? (morning vs afternoon/evening)"
    );
}

#[test]
fn unknown_pair_uses_generic_questions() {
    let bank = QuestionBank::builtin();
    assert_eq!(
        bank.differential_questions("Aconite", "Belladonna"),
        bank.generic_differential.as_slice()
    );
}

#[test]
fn pair_key_normalizes_names() {
    assert_eq!(pair_key(" Natrum Mur "), "natrum_mur");
}

#[test]
fn category_without_questions_is_rejected() {
    let mut bank = QuestionBank::builtin();
    bank.categories[0].questions.clear();
    assert!(matches!(
        bank.validate(),
        Err(ConfigError::EmptyQuestionBank(what)) if what == "category mental_emotional"
    ));
}

#[test]
fn zero_minimum_is_rejected() {
    let mut bank = QuestionBank::builtin();
    bank.categories[1].min_required = 0;
    assert!(matches!(
        bank.validate(),
        Err(ConfigError::InvalidCategory { category, .. }) if category == "thermal_state"
    ));
}

#[test]
fn empty_generic_bank_is_rejected() {
    let mut bank = QuestionBank::builtin();
    bank.constitutional_questions.clear();
    assert!(matches!(
        bank.validate(),
        Err(ConfigError::EmptyQuestionBank(what)) if what == "constitutional_questions"
    ));
}

#[test]
fn bank_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    let bank = QuestionBank::builtin();
    std::fs::write(&path, serde_json::to_string_pretty(&bank).unwrap()).unwrap();
    assert_eq!(QuestionBank::load(&path).unwrap(), bank);
}
