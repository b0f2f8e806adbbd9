mod common;

use common::{arsenicum_corpus, complaint, engine, full_record};
use repertor_engine::evaluation::{LabelledCase, evaluate, load_dataset, parse_dataset};

#[test]
fn dataset_accepts_bare_and_wrapped_arrays() {
    let bare = r#"[{"label": "a", "case": {"presenting_complaint": "cough"}, "expected_remedy": "Bryonia"}]"#;
    let wrapped = r#"{"test_cases": [{"case_id": "b", "case": {}, "expected": "Sulphur"}]}"#;
    assert_eq!(parse_dataset(bare).unwrap()[0].label, "a");
    let cases = parse_dataset(wrapped).unwrap();
    assert_eq!(cases[0].label, "b");
    assert_eq!(cases[0].expected_remedy, "Sulphur");
}

#[test]
fn dataset_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cases.json");
    std::fs::write(
        &path,
        r#"[{"label": "a", "case": {"presenting_complaint": "cough"}, "expected_remedy": "Bryonia"}]"#,
    )
    .unwrap();
    assert_eq!(load_dataset(&path).unwrap().len(), 1);
}

#[test]
fn report_counts_hits_and_statuses() {
    let cases = vec![
        LabelledCase {
            label: "full".to_string(),
            case: full_record(),
            expected_remedy: "arsenicum".to_string(),
        },
        LabelledCase {
            label: "sparse".to_string(),
            case: complaint("burning pains"),
            expected_remedy: "Sulphur".to_string(),
        },
        LabelledCase {
            label: "unmatched".to_string(),
            case: complaint("mild fatigue"),
            expected_remedy: "Sulphur".to_string(),
        },
    ];

    let report = evaluate(&engine(), &cases, &arsenicum_corpus());
    assert_eq!(report.evaluated, 3);
    assert_eq!(report.completed, 2);
    assert_eq!(report.correct, 1);
    assert!((report.accuracy - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.by_status["complete"], 2);
    assert_eq!(report.by_status["no_candidates"], 1);
    assert!(report.cases[0].hit);
    assert_eq!(report.cases[1].selected_remedy.as_deref(), Some("Arsenicum"));
    assert!(!report.cases[1].hit);
}

#[test]
fn empty_dataset_has_zero_accuracy() {
    let report = evaluate(&engine(), &[], &arsenicum_corpus());
    assert_eq!(report.evaluated, 0);
    assert_eq!(report.accuracy, 0.0);
}
