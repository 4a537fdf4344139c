pub mod dataset;
pub mod guardrail;
pub mod prompt;
pub mod translate;
