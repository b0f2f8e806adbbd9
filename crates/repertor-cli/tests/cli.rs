use std::path::PathBuf;
use std::process::Command;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(name)
}

fn repertor(args: &[&str]) -> serde_json::Value {
    let output = Command::new(env!("CARGO_BIN_EXE_repertor"))
        .args(args)
        .env_remove("REPERTOR_RUBRICS")
        .env_remove("REPERTOR_SETTINGS")
        .env_remove("REPERTOR_QUESTIONS")
        .env_remove("REPERTOR_CORPUS")
        .env("RUST_LOG", "warn")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn check_config_reports_loaded_tables() {
    let rubrics = data("rubrics.json");
    let value = repertor(&["--rubrics", rubrics.to_str().unwrap(), "check-config"]);
    assert_eq!(value["valid"], true);
    assert_eq!(value["rubrics"], 12);
    assert_eq!(value["red_flags"], 9);
    assert_eq!(value["question_categories"], 10);
}

#[test]
fn screen_needs_no_rubric_table() {
    let case = data("case.json");
    let value = repertor(&["screen", case.to_str().unwrap()]);
    assert_eq!(value["emergency"], false);
    assert_eq!(value["red_flags"].as_array().unwrap().len(), 0);
}

#[test]
fn analyze_prints_a_tagged_result() {
    let rubrics = data("rubrics.json");
    let corpus = data("corpus");
    let case = data("case.json");
    let value = repertor(&[
        "--rubrics",
        rubrics.to_str().unwrap(),
        "analyze",
        case.to_str().unwrap(),
        "--skip-gating",
        "--corpus",
        corpus.to_str().unwrap(),
    ]);
    assert_eq!(value["outcome"]["status"], "complete");
    assert_eq!(value["outcome"]["recommendation"]["remedy"], "Arsenicum");
    assert!(value.get("augmentation").is_none());
}

#[test]
fn missing_rubric_table_fails() {
    let case = data("case.json");
    let output = Command::new(env!("CARGO_BIN_EXE_repertor"))
        .args(["analyze", case.to_str().unwrap()])
        .env_remove("REPERTOR_RUBRICS")
        .output()
        .unwrap();
    assert!(!output.status.success());
}
