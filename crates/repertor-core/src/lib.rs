//! repertor-core
//!
//! Pure domain types for the clinical decision engine: the case record, the
//! rubric vocabulary, differential and completeness results, and the workflow
//! result contract. No I/O.

pub mod error;
pub mod messages;
pub mod models;
