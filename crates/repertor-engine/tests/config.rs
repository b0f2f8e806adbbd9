use std::path::Path;

use repertor_engine::error::ConfigError;
use repertor_engine::{ConfigPaths, EngineConfig, EngineSettings, Thresholds};

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const RUBRICS: &str = r#"[
    {"rubric": "burning-worse-heat", "weight": 8, "keywords": "burning, worse heat", "candidate_remedies": "Arsenicum; Sulphur"},
    {"name": "weeping", "weight": 5, "keywords": ["weeping", "Consolation"], "outcomes": ["Pulsatilla"]},
    {"rubric": "thirst", "keywords": "thirst", "candidate_remedies": ["Bryonia"]}
]"#;

#[test]
fn rubric_rows_accept_delimited_and_array_forms() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "rubrics.json", RUBRICS);
    let table = repertor_engine::config::load_rubrics(&path).unwrap();

    let rubrics = table.rubrics();
    assert_eq!(rubrics.len(), 3);
    assert_eq!(rubrics[0].keywords, vec!["burning", "worse heat"]);
    assert_eq!(rubrics[0].outcomes, vec!["Arsenicum", "Sulphur"]);
    assert_eq!(rubrics[1].name, "weeping");
    assert_eq!(rubrics[1].keywords, vec!["weeping", "consolation"]);
    assert_eq!(rubrics[2].weight, 1);
}

#[test]
fn non_positive_weights_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    for weight in ["0", "-3"] {
        let path = write(
            dir.path(),
            "rubrics.json",
            &format!(r#"[{{"rubric": "r", "weight": {weight}, "keywords": "a", "candidate_remedies": "X"}}]"#),
        );
        assert!(matches!(
            repertor_engine::config::load_rubrics(&path),
            Err(ConfigError::InvalidWeight { .. })
        ));
    }
}

#[test]
fn empty_table_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "rubrics.json", "[]");
    assert!(matches!(
        repertor_engine::config::load_rubrics(&path),
        Err(ConfigError::EmptyRubricTable)
    ));
}

#[test]
fn unreadable_and_malformed_files_are_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        repertor_engine::config::load_rubrics(&missing),
        Err(ConfigError::Io { path, .. }) if path == missing
    ));

    let bad = write(dir.path(), "bad.json", "{not json");
    assert!(matches!(
        repertor_engine::config::load_rubrics(&bad),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn settings_default_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "settings.json", r#"{"thresholds": {"max_candidates": 4}}"#);
    let settings = EngineSettings::load(&path).unwrap();
    assert_eq!(settings.thresholds.max_candidates, 4);
    assert_eq!(settings.thresholds.top_candidates, Thresholds::default().top_candidates);
    assert!(!settings.require_reference_text);
    assert!(settings.red_flags.is_none());
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "settings.json",
        r#"{"thresholds": {"clarification_confidence": 1.5}}"#,
    );
    assert!(matches!(
        EngineSettings::load(&path),
        Err(ConfigError::InvalidSetting { name, .. }) if name == "clarification_confidence"
    ));
}

#[test]
fn full_configuration_loads_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let rubrics = write(dir.path(), "rubrics.json", RUBRICS);
    let settings = write(
        dir.path(),
        "settings.json",
        r#"{"red_flags": ["Fainting"], "require_reference_text": true}"#,
    );
    let config = EngineConfig::load(&ConfigPaths {
        rubrics,
        settings: Some(settings),
        questions: None,
    })
    .unwrap();

    assert_eq!(config.rubrics.len(), 3);
    assert_eq!(config.safety.phrases(), &["fainting"]);
    assert!(config.settings.require_reference_text);
    assert_eq!(config.questions.categories.len(), 10);
}

#[test]
fn empty_red_flag_override_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let rubrics = write(dir.path(), "rubrics.json", RUBRICS);
    let settings = write(dir.path(), "settings.json", r#"{"red_flags": []}"#);
    let result = EngineConfig::load(&ConfigPaths {
        rubrics,
        settings: Some(settings),
        questions: None,
    });
    assert!(matches!(result, Err(ConfigError::EmptyRedFlags)));
}
