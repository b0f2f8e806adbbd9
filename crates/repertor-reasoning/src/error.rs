use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReasoningError {
    #[error("reasoning service invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response did not conform to expected schema: {0}")]
    SchemaViolation(String),
}
