//! Application layer - use cases and orchestration.
//!
//! Services here orchestrate the domain ports (traits) and never depend on
//! concrete adapters, so every flow can run against in-memory test doubles.

pub mod prompts;
pub mod services;

pub use services::{ImportService, SubmissionService, SuggestionPipeline, Suggestions};
