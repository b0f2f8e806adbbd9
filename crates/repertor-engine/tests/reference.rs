mod common;

use repertor_core::models::rubric::OutcomeCandidate;
use repertor_engine::error::ReferenceError;
use repertor_engine::reference::{
    CorpusDocument, NoReference, ReferenceSource, StaticCorpus, gather, text_for,
    title_from_stem,
};

struct Failing;

impl ReferenceSource for Failing {
    fn passages(&self, _remedy: &str, _case_summary: &str) -> Result<Vec<String>, ReferenceError> {
        Err(ReferenceError::Unavailable("search index offline".to_string()))
    }
}

fn candidates(names: &[&str]) -> Vec<OutcomeCandidate> {
    names
        .iter()
        .map(|n| OutcomeCandidate {
            name: n.to_string(),
            score: 1.0,
            reasons: Vec::new(),
        })
        .collect()
}

#[test]
fn title_comes_from_file_stem() {
    assert_eq!(title_from_stem("arsenicum_album"), "Arsenicum Album");
    assert_eq!(title_from_stem("RHUS-tox"), "Rhus Tox");
}

#[test]
fn corpus_loads_markdown_files_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("arsenicum_album.md"), "Anxious, restless, chilly.").unwrap();
    std::fs::write(dir.path().join("pulsatilla.md"), "Weeping, better consolation.").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let corpus = StaticCorpus::load_dir(dir.path(), 2).unwrap();
    let titles: Vec<&str> = corpus.documents().iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Arsenicum Album", "Pulsatilla"]);

    let passages = corpus.passages("Arsenicum", "").unwrap();
    assert_eq!(passages, vec!["Anxious, restless, chilly."]);
    assert!(corpus.passages("Sulphur", "").unwrap().is_empty());
}

#[test]
fn blank_titled_documents_match_nothing() {
    let corpus = StaticCorpus::new(
        vec![CorpusDocument {
            id: "_.md".to_string(),
            title: String::new(),
            text: "unrelated".to_string(),
        }],
        2,
    );
    assert!(corpus.documents().is_empty());
    assert!(corpus.passages("Arsenicum", "").unwrap().is_empty());

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("_.md"), "unrelated").unwrap();
    std::fs::write(dir.path().join("bryonia.md"), "Worse from motion.").unwrap();
    let loaded = StaticCorpus::load_dir(dir.path(), 2).unwrap();
    assert_eq!(loaded.documents().len(), 1);
    assert!(loaded.passages("Arsenicum", "").unwrap().is_empty());
}

#[test]
fn missing_corpus_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        StaticCorpus::load_dir(&dir.path().join("absent"), 2),
        Err(ReferenceError::Io { .. })
    ));
}

#[test]
fn passages_are_capped_per_remedy() {
    let doc = |id: &str| CorpusDocument {
        id: id.to_string(),
        title: "Sulphur".to_string(),
        text: format!("text {id}"),
    };
    let corpus = StaticCorpus::new(vec![doc("c"), doc("a"), doc("b")], 2);
    assert_eq!(
        corpus.passages("sulphur", "").unwrap(),
        vec!["text a", "text b"]
    );
}

#[test]
fn failed_lookups_degrade_to_no_passages() {
    let references = gather(&Failing, &candidates(&["Arsenicum", "Sulphur"]), "summary");
    assert_eq!(references.len(), 2);
    assert!(references.iter().all(|r| !r.available && r.passages.is_empty()));
}

#[test]
fn no_reference_source_yields_empty_text() {
    let references = gather(&NoReference, &candidates(&["Arsenicum"]), "summary");
    assert!(references[0].available);
    assert_eq!(text_for(&references, "Arsenicum"), (String::new(), 0));
    assert_eq!(text_for(&references, "Unknown"), (String::new(), 0));
}

#[test]
fn reference_text_is_lowercased() {
    let references = gather(&common::arsenicum_corpus(), &candidates(&["Arsenicum"]), "");
    let (text, passages) = text_for(&references, "Arsenicum");
    assert_eq!(passages, 1);
    assert!(text.contains("chilly and cold"));
    assert!(!text.chars().any(char::is_uppercase));
}
