mod common;

use common::{complaint, full_record, strings};
use repertor_core::models::completeness::{AskReason, QuestionKind, QuestionPriority};
use repertor_core::models::record::{CaseRecord, Particular, Sex};
use repertor_engine::Thresholds;
use repertor_engine::completeness::CompletenessAnalyzer;
use repertor_engine::questions::QuestionBank;

fn analyzer_parts() -> (QuestionBank, Thresholds) {
    (QuestionBank::builtin(), Thresholds::default())
}

#[test]
fn full_record_scores_one_and_is_ready() {
    let (bank, thresholds) = analyzer_parts();
    let report = CompletenessAnalyzer::new(&bank, &thresholds).analyze(&full_record());
    assert_eq!(report.score, 1.0);
    assert!(report.gaps.is_empty());
    assert!(report.ready_to_proceed);
    assert!(report.priority_questions.is_empty());
}

#[test]
fn empty_record_scores_zero_with_gaps_heaviest_first() {
    let (bank, thresholds) = analyzer_parts();
    let report = CompletenessAnalyzer::new(&bank, &thresholds).analyze(&CaseRecord::default());
    assert_eq!(report.score, 0.0);
    assert!(!report.ready_to_proceed);

    let order: Vec<&str> = report.gaps.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "mental_emotional",
            "modalities",
            "causation",
            "thermal_state",
            "past_suppression",
            "sleep",
            "food_preferences",
            "laterality",
            "discharges",
        ]
    );
}

#[test]
fn gap_questions_cover_missing_items_plus_two() {
    let (bank, thresholds) = analyzer_parts();
    let report = CompletenessAnalyzer::new(&bank, &thresholds).analyze(&CaseRecord::default());
    let modalities = report
        .gaps
        .iter()
        .find(|g| g.category == "modalities")
        .unwrap();
    assert_eq!(modalities.needed, 3);
    assert_eq!(modalities.questions.len(), 5);

    assert_eq!(report.priority_questions.len(), 10);
    assert_eq!(report.priority_questions[0], report.gaps[0].questions[0]);
    assert_eq!(report.priority_questions[2], report.gaps[1].questions[0]);
}

#[test]
fn partial_coverage_counts_proportionally() {
    let (bank, thresholds) = analyzer_parts();
    let mut record = full_record();
    record.mental_emotional = strings(&["anxious"]);
    let report = CompletenessAnalyzer::new(&bank, &thresholds).analyze(&record);

    // 10 + 8 + 9 + 6 + 7 + 9 + 6 + 5 + 8 = 68, mental half covered
    let expected = (68.0 - 5.0) / 68.0;
    assert!((report.score - expected).abs() < 1e-9);
    assert_eq!(report.gaps.len(), 1);
    assert_eq!(report.gaps[0].current_count, 1);
    assert_eq!(report.gaps[0].needed, 1);
}

#[test]
fn menstrual_category_applies_only_to_female_records() {
    let (bank, thresholds) = analyzer_parts();
    let analyzer = CompletenessAnalyzer::new(&bank, &thresholds);

    let mut record = full_record();
    record.sex = Some(Sex::Male);
    assert_eq!(analyzer.analyze(&record).score, 1.0);

    record.sex = Some(Sex::Female);
    let report = analyzer.analyze(&record);
    assert!(report.score < 1.0);
    assert_eq!(report.gaps[0].category, "menstrual");

    record.generals = strings(&["irregular menses", "worse before period"]);
    assert_eq!(analyzer.analyze(&record).score, 1.0);
}

#[test]
fn score_stays_in_unit_range() {
    let (bank, thresholds) = analyzer_parts();
    let analyzer = CompletenessAnalyzer::new(&bank, &thresholds);
    let mut record = full_record();
    record.mental_emotional = (0..50).map(|i| format!("m{i}")).collect();
    let score = analyzer.analyze(&record).score;
    assert!((0.0..=1.0).contains(&score));
}

#[test]
fn sparse_record_asks_for_essentials_first() {
    let (bank, thresholds) = analyzer_parts();
    let plan = CompletenessAnalyzer::new(&bank, &thresholds).plan_questions(
        &complaint("headache"),
        &[],
        0.5,
    );
    assert!(plan.should_ask);
    assert_eq!(plan.reason, Some(AskReason::InsufficientInformation));
    assert_eq!(plan.questions.len(), 10);
    assert!(plan.questions[..5]
        .iter()
        .all(|q| q.kind == QuestionKind::Essential && q.priority == QuestionPriority::High));
    assert_eq!(plan.questions[5].kind, QuestionKind::Modality);
}

#[test]
fn close_candidates_get_pair_questions() {
    let (bank, thresholds) = analyzer_parts();
    let plan = CompletenessAnalyzer::new(&bank, &thresholds).plan_questions(
        &full_record(),
        &strings(&["Pulsatilla", "Sulphur"]),
        0.4,
    );
    assert_eq!(plan.reason, Some(AskReason::DifferentiateCandidates));
    let differential: Vec<&str> = plan
        .questions
        .iter()
        .filter(|q| q.kind == QuestionKind::Differential)
        .map(|q| q.question.as_str())
        .collect();
    assert_eq!(differential.len(), 3);
    assert_eq!(differential[0], "Do you feel worse from heat or better from heat?");
}

#[test]
fn unknown_pair_falls_back_to_generic_questions() {
    let (bank, thresholds) = analyzer_parts();
    let plan = CompletenessAnalyzer::new(&bank, &thresholds).plan_questions(
        &full_record(),
        &strings(&["Arsenicum", "Rhus Tox"]),
        0.4,
    );
    assert_eq!(plan.questions[0].kind, QuestionKind::Differential);
    assert_eq!(plan.questions[0].question, bank.generic_differential[0]);
}

#[test]
fn confident_complete_case_does_not_ask() {
    let (bank, thresholds) = analyzer_parts();
    let plan = CompletenessAnalyzer::new(&bank, &thresholds).plan_questions(
        &full_record(),
        &strings(&["Arsenicum", "Rhus Tox"]),
        0.9,
    );
    assert!(!plan.should_ask);
    assert_eq!(plan.reason, None);
    assert_eq!(plan.completeness_score, 1.0);
}

#[test]
fn incomplete_but_adequate_case_reports_essential_categories() {
    let (bank, thresholds) = analyzer_parts();
    let mut record = full_record();
    record.etiology = None;
    record.past_history.clear();
    record.sleep.clear();
    let plan = CompletenessAnalyzer::new(&bank, &thresholds).plan_questions(&record, &[], 0.9);
    assert!(plan.completeness_score >= 0.6);
    assert_eq!(plan.reason, Some(AskReason::EssentialCategoriesIncomplete));
}

#[test]
fn clarifications_are_deduplicated_in_order() {
    let (bank, thresholds) = analyzer_parts();
    let mut record = complaint("headache and cough");
    record.particulars.push(Particular {
        description: "left-sided headache".to_string(),
        ..Default::default()
    });
    let questions = CompletenessAnalyzer::new(&bank, &thresholds).symptom_clarifications(&record);
    assert_eq!(questions.len(), 6);
    assert_eq!(questions[0], "Describe the exact location of the headache");
    assert_eq!(questions[3], "Is the cough dry or with expectoration?");
}
