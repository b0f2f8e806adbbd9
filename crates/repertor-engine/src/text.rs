//! Case text as the matching primitive: lowercase concatenation plus substring
//! tests. No tokenization or stemming, so a short keyword can match inside an
//! unrelated longer word.

use repertor_core::models::record::CaseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobScope {
    /// Every clinical field; administrative fields excluded.
    Clinical,
    /// Clinical fields plus administrative ones.
    Full,
}

/// Each non-blank clinical string of the record, in a fixed field order.
pub fn clinical_items(record: &CaseRecord) -> Vec<&str> {
    let mut items: Vec<&str> = vec![record.presenting_complaint.as_str()];

    for field in [&record.onset, &record.duration, &record.course, &record.etiology] {
        if let Some(value) = field.as_deref() {
            items.push(value);
        }
    }
    if let Some(thermal) = record.thermal {
        items.extend(thermal.terms().iter().copied());
    }

    for list in [
        &record.mental_emotional,
        &record.generals,
        &record.cravings,
        &record.aversions,
        &record.sleep,
        &record.dreams,
        &record.past_history,
        &record.family_history,
        &record.lifestyle,
    ] {
        items.extend(list.iter().map(String::as_str));
    }

    for particular in &record.particulars {
        if let Some(section) = particular.section.as_deref() {
            items.push(section);
        }
        items.push(particular.description.as_str());
        items.extend(particular.modalities_better.iter().map(String::as_str));
        items.extend(particular.modalities_worse.iter().map(String::as_str));
        items.extend(particular.concomitants.iter().map(String::as_str));
    }

    items.extend(record.red_flags.iter().map(String::as_str));

    items
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercase, space-joined text of the record.
pub fn record_blob(record: &CaseRecord, scope: BlobScope) -> String {
    let mut items = Vec::new();
    if scope == BlobScope::Full
        && let Some(case_id) = record.case_id.as_deref()
    {
        items.push(case_id.trim());
    }
    items.extend(clinical_items(record));
    items.join(" ").to_lowercase()
}

/// Substring test of a trimmed, lowercased needle against lowercase text.
/// Blank needles never match.
pub fn contains_phrase(haystack_lower: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    !needle.is_empty() && haystack_lower.contains(&needle)
}

/// Alphanumeric word tokens of lowercase text.
pub fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}
