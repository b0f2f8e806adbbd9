//! repertor-engine
//!
//! The clinical decision engine. Pure, synchronous scoring over a case record
//! and immutable configuration tables: emergency screening, rubric matching,
//! totality and differential ranking, potency selection, completeness analysis
//! with follow-up questioning, and the workflow that sequences them.

pub mod completeness;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod potency;
pub mod questions;
pub mod reference;
pub mod repertory;
pub mod safety;
pub mod text;
pub mod totality;
pub mod workflow;

pub use config::{ConfigPaths, EngineConfig, EngineSettings, Thresholds};
pub use workflow::{AnalyzeOptions, Engine};
