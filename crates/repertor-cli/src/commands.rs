use std::io::Read;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, eyre};
use repertor_core::messages;
use repertor_core::models::record::CaseRecord;
use repertor_core::models::workflow::WorkflowResult;
use repertor_engine::evaluation::{EvaluationReport, evaluate as run_evaluation, load_dataset};
use repertor_engine::reference::{NoReference, ReferenceSource, StaticCorpus};
use repertor_engine::safety::SafetyGate;
use repertor_engine::{AnalyzeOptions, ConfigPaths, Engine, EngineConfig, EngineSettings};
use repertor_reasoning::{Augmentation, OpenAiCompatible, augment};
use serde::Serialize;
use tracing::info;

pub struct ConfigArgs {
    pub rubrics: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub questions: Option<PathBuf>,
}

impl ConfigArgs {
    fn load_engine(&self) -> Result<Engine> {
        let rubrics = self
            .rubrics
            .clone()
            .ok_or_else(|| eyre!("a rubric table is required (--rubrics or REPERTOR_RUBRICS)"))?;
        let config = EngineConfig::load(&ConfigPaths {
            rubrics,
            settings: self.settings.clone(),
            questions: self.questions.clone(),
        })?;
        Ok(Engine::new(config))
    }
}

pub struct ReasoningTarget {
    pub url: Option<String>,
    pub model: String,
    pub api_key: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeOutput {
    #[serde(flatten)]
    result: WorkflowResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    augmentation: Option<Augmentation>,
}

#[derive(Serialize)]
struct ScreenOutput {
    emergency: bool,
    red_flags: Vec<String>,
    disclaimer: &'static str,
}

#[derive(Serialize)]
struct TimestampedReport {
    generated_at: jiff::Timestamp,
    #[serde(flatten)]
    report: EvaluationReport,
}

pub fn analyze(
    config: &ConfigArgs,
    case: &Path,
    skip_gating: bool,
    corpus: Option<&Path>,
    reasoning: Option<ReasoningTarget>,
) -> Result<()> {
    let engine = config.load_engine()?;
    let reference = reference_source(corpus, &engine)?;
    let record = read_case(case)?;

    let result = engine.analyze(&record, &*reference, AnalyzeOptions { skip_gating });

    let augmentation = match (reasoning, result.outcome.recommendation()) {
        (Some(target), Some(recommendation)) => {
            let url = target
                .url
                .ok_or_else(|| eyre!("--augment needs --reasoning-url or REPERTOR_REASONING_URL"))?;
            let service = OpenAiCompatible::new(url, target.model, target.api_key);
            augment(&service, &record, recommendation)
        }
        _ => None,
    };

    print_json(&AnalyzeOutput {
        result,
        augmentation,
    })
}

pub fn screen(config: &ConfigArgs, case: &Path) -> Result<()> {
    let gate = match &config.settings {
        Some(path) => match EngineSettings::load(path)?.red_flags {
            Some(phrases) => SafetyGate::new(phrases)?,
            None => SafetyGate::default(),
        },
        None => SafetyGate::default(),
    };
    let red_flags = gate.screen(&read_case(case)?);
    print_json(&ScreenOutput {
        emergency: !red_flags.is_empty(),
        red_flags,
        disclaimer: messages::DISCLAIMER,
    })
}

pub fn questions(config: &ConfigArgs, case: &Path) -> Result<()> {
    let engine = config.load_engine()?;
    let record = read_case(case)?;
    let top = engine.config().thresholds().top_candidates;
    let candidates: Vec<String> = engine
        .repertorize(&record)
        .top(top)
        .iter()
        .map(|c| c.name.clone())
        .collect();
    print_json(&engine.plan_questions(&record, &candidates, 0.5))
}

pub fn evaluate(config: &ConfigArgs, dataset: &Path, corpus: Option<&Path>) -> Result<()> {
    let engine = config.load_engine()?;
    let reference = reference_source(corpus, &engine)?;
    let cases = load_dataset(dataset)?;
    let report = run_evaluation(&engine, &cases, &*reference);
    print_json(&TimestampedReport {
        generated_at: jiff::Timestamp::now(),
        report,
    })
}

pub fn check_config(config: &ConfigArgs) -> Result<()> {
    let engine = config.load_engine()?;
    let loaded = engine.config();
    info!(
        rubrics = loaded.rubrics.len(),
        red_flags = loaded.safety.phrases().len(),
        "configuration is valid"
    );
    print_json(&serde_json::json!({
        "valid": true,
        "rubrics": loaded.rubrics.len(),
        "red_flags": loaded.safety.phrases().len(),
        "question_categories": loaded.questions.categories.len(),
        "differential_pairs": loaded.questions.differential_pairs.len(),
    }))
}

fn reference_source(corpus: Option<&Path>, engine: &Engine) -> Result<Box<dyn ReferenceSource>> {
    Ok(match corpus {
        Some(dir) => Box::new(StaticCorpus::load_dir(
            dir,
            engine.config().thresholds().passages_per_remedy,
        )?),
        None => Box::new(NoReference),
    })
}

fn read_case(path: &Path) -> Result<CaseRecord> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .wrap_err("failed to read case from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read case {}", path.display()))?
    };
    CaseRecord::from_json(&contents).wrap_err("case record is not valid JSON")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
