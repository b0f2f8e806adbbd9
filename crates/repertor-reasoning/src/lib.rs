//! repertor-reasoning
//!
//! Optional text-generation augmentation of a completed recommendation:
//! prompt construction, a narrow service trait, an OpenAI-compatible HTTP
//! client, and tolerant reply parsing. Nothing here feeds back into the
//! engine's result.

pub mod augment;
pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;

pub use augment::{Augmentation, augment};
pub use client::{OpenAiCompatible, ReasoningService};
