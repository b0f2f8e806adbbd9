pub mod completeness;
pub mod differential;
pub mod recommendation;
pub mod record;
pub mod rubric;
pub mod workflow;
