//! Reference-text collaborator seam.
//!
//! The engine asks a [`ReferenceSource`] for free-text passages describing each
//! leading remedy. Sources may be semantic search services, static corpora, or
//! nothing at all; the engine treats missing or failed lookups as zero
//! passages and keeps going.

use std::path::Path;

use repertor_core::models::rubric::OutcomeCandidate;
use tracing::{info, warn};

use crate::error::ReferenceError;

pub trait ReferenceSource: Send + Sync {
    /// Passages describing `remedy`. `case_summary` lets search-backed
    /// sources rank passages against the case.
    fn passages(&self, remedy: &str, case_summary: &str) -> Result<Vec<String>, ReferenceError>;
}

/// A source with no material. Every remedy gets zero passages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReference;

impl ReferenceSource for NoReference {
    fn passages(&self, _remedy: &str, _case_summary: &str) -> Result<Vec<String>, ReferenceError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorpusDocument {
    pub id: String,
    pub title: String,
    pub text: String,
}

/// Immutable in-memory corpus of remedy monographs.
#[derive(Debug, Clone)]
pub struct StaticCorpus {
    documents: Vec<CorpusDocument>,
    passages_per_remedy: usize,
}

impl StaticCorpus {
    /// Documents with a blank title can never be attributed to a remedy and
    /// are dropped.
    pub fn new(mut documents: Vec<CorpusDocument>, passages_per_remedy: usize) -> Self {
        documents.retain(|doc| !doc.title.trim().is_empty());
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            documents,
            passages_per_remedy,
        }
    }

    /// Load every `*.md` file in `dir`. Titles come from the file stem:
    /// `arsenicum_album.md` becomes "Arsenicum Album".
    pub fn load_dir(dir: &Path, passages_per_remedy: usize) -> Result<Self, ReferenceError> {
        let io_err = |source| ReferenceError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut documents = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text = std::fs::read_to_string(&path).map_err(|source| ReferenceError::Io {
                path: path.clone(),
                source,
            })?;
            documents.push(CorpusDocument {
                id: format!("{stem}.md"),
                title: title_from_stem(stem),
                text,
            });
        }

        let corpus = Self::new(documents, passages_per_remedy);
        info!(dir = %dir.display(), documents = corpus.documents.len(), "reference corpus loaded");
        Ok(corpus)
    }

    pub fn documents(&self) -> &[CorpusDocument] {
        &self.documents
    }
}

impl ReferenceSource for StaticCorpus {
    fn passages(&self, remedy: &str, _case_summary: &str) -> Result<Vec<String>, ReferenceError> {
        let wanted = remedy.trim().to_lowercase();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .documents
            .iter()
            .filter(|doc| {
                let title = doc.title.trim().to_lowercase();
                !title.is_empty()
                    && (title == wanted || title.contains(&wanted) || wanted.contains(&title))
            })
            .take(self.passages_per_remedy)
            .map(|doc| doc.text.clone())
            .collect())
    }
}

pub fn title_from_stem(stem: &str) -> String {
    stem.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Passages gathered for one remedy.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceText {
    pub remedy: String,
    pub passages: Vec<String>,
    /// False when the source failed and the passages were replaced by none.
    pub available: bool,
}

impl ReferenceText {
    pub fn lowercase_text(&self) -> String {
        self.passages.join("\n").to_lowercase()
    }
}

/// Fetch passages for each candidate, degrading failures to zero passages.
pub fn gather(
    source: &dyn ReferenceSource,
    candidates: &[OutcomeCandidate],
    case_summary: &str,
) -> Vec<ReferenceText> {
    candidates
        .iter()
        .map(|candidate| match source.passages(&candidate.name, case_summary) {
            Ok(passages) => ReferenceText {
                remedy: candidate.name.clone(),
                passages,
                available: true,
            },
            Err(e) => {
                warn!(remedy = %candidate.name, error = %e, "reference lookup failed; continuing without it");
                ReferenceText {
                    remedy: candidate.name.clone(),
                    passages: Vec::new(),
                    available: false,
                }
            }
        })
        .collect()
}

/// Lowercase reference text for `remedy`, empty when none was gathered.
pub fn text_for(references: &[ReferenceText], remedy: &str) -> (String, usize) {
    references
        .iter()
        .find(|r| r.remedy == remedy)
        .map(|r| (r.lowercase_text(), r.passages.len()))
        .unwrap_or_default()
}
