use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "repertor")]
#[command(version, about = "Rule-based case analysis and remedy recommendation")]
struct Cli {
    /// Rubric table (JSON)
    #[arg(long, env = "REPERTOR_RUBRICS", global = true)]
    rubrics: Option<PathBuf>,

    /// Engine settings (JSON)
    #[arg(long, env = "REPERTOR_SETTINGS", global = true)]
    settings: Option<PathBuf>,

    /// Question bank replacing the built-in one (JSON)
    #[arg(long, env = "REPERTOR_QUESTIONS", global = true)]
    questions: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full workflow on one case record
    Analyze {
        /// Case record (JSON), or `-` for stdin
        case: PathBuf,
        /// Bypass the questioning gates
        #[arg(long)]
        skip_gating: bool,
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Ask the reasoning service to explain a completed recommendation
        #[arg(long)]
        augment: bool,
        #[command(flatten)]
        reasoning: ReasoningArgs,
    },
    /// Emergency red-flag screen only
    Screen {
        /// Case record (JSON), or `-` for stdin
        case: PathBuf,
    },
    /// Completeness report and follow-up questions
    Questions {
        /// Case record (JSON), or `-` for stdin
        case: PathBuf,
    },
    /// Score the engine against labelled cases
    Evaluate {
        /// Dataset (JSON array or `{"test_cases": [...]}`)
        dataset: PathBuf,
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Load and validate configuration, then exit
    CheckConfig,
}

#[derive(Args)]
struct CorpusArgs {
    /// Directory of remedy monographs (`*.md`)
    #[arg(long, env = "REPERTOR_CORPUS")]
    corpus: Option<PathBuf>,
}

#[derive(Args)]
struct ReasoningArgs {
    /// OpenAI-compatible base URL, e.g. https://api.openai.com/v1
    #[arg(long, env = "REPERTOR_REASONING_URL")]
    reasoning_url: Option<String>,

    #[arg(long, env = "REPERTOR_REASONING_MODEL", default_value = "gpt-4o-mini")]
    reasoning_model: String,

    #[arg(long, env = "REPERTOR_REASONING_KEY", hide_env_values = true)]
    reasoning_key: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = commands::ConfigArgs {
        rubrics: cli.rubrics,
        settings: cli.settings,
        questions: cli.questions,
    };

    match cli.command {
        Command::Analyze {
            case,
            skip_gating,
            corpus,
            augment,
            reasoning,
        } => {
            let reasoning = augment.then(|| commands::ReasoningTarget {
                url: reasoning.reasoning_url,
                model: reasoning.reasoning_model,
                api_key: reasoning.reasoning_key,
            });
            commands::analyze(&config, &case, skip_gating, corpus.corpus.as_deref(), reasoning)
        }
        Command::Screen { case } => commands::screen(&config, &case),
        Command::Questions { case } => commands::questions(&config, &case),
        Command::Evaluate { dataset, corpus } => {
            commands::evaluate(&config, &dataset, corpus.corpus.as_deref())
        }
        Command::CheckConfig => commands::check_config(&config),
    }
}
