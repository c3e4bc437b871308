mod import;
mod submission;
mod suggestion;

pub use import::{parse_faq_export, ImportService};
pub use submission::SubmissionService;
pub use suggestion::{SuggestionPipeline, Suggestions};
