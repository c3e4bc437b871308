use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::{
    normalize::{replace_aliases, CURRENCY_ALIASES},
    ports::{Collection, VectorStore},
    DomainError, FaqTemplate, NewDocument,
};

/// Expected column order of the FAQ export:
/// mainCategory, subCategory, question, priority, targetAudience, templateAnswer.
const FAQ_COLUMNS: usize = 6;

/// One-shot bulk load of the FAQ export into the primary collection.
///
/// Runs once at process start, before the server accepts requests. The
/// primary collection is truncated and repopulated in full; a failure here
/// must abort startup.
pub struct ImportService {
    store: Arc<dyn VectorStore>,
}

impl ImportService {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Loads the FAQ file and returns the number of imported templates.
    /// A missing file is not an error; it imports nothing and logs a warning.
    #[instrument(skip(self))]
    pub async fn load(&self, path: &Path) -> Result<usize, DomainError> {
        if !path.exists() {
            warn!(path = %path.display(), "FAQ export not found, skipping bulk import");
            return Ok(0);
        }

        let file = std::fs::File::open(path)
            .map_err(|e| DomainError::internal(format!("open {}: {e}", path.display())))?;
        let templates = parse_faq_export(file)?;

        self.store.truncate(Collection::Primary).await?;

        let documents: Vec<NewDocument> = templates
            .into_iter()
            .map(|t| NewDocument::new(t.question.clone(), t))
            .collect();
        let count = documents.len();
        if !documents.is_empty() {
            self.store
                .add_documents(Collection::Primary, &documents)
                .await?;
        }

        info!(count, "bulk import finished");
        Ok(count)
    }
}

/// Parses the tabular FAQ export.
///
/// The header row is skipped, rows with fewer than six columns are dropped,
/// and empty cells import as empty strings. Currency wording in the
/// question column is canonicalized before the text is ever embedded.
pub fn parse_faq_export<R: Read>(reader: R) -> Result<Vec<FaqTemplate>, DomainError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut templates = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| DomainError::internal(format!("read FAQ row: {e}")))?;
        if record.len() < FAQ_COLUMNS {
            continue;
        }

        let cell = |i: usize| record.get(i).unwrap_or_default().trim().to_string();
        templates.push(FaqTemplate {
            main_category: cell(0),
            sub_category: cell(1),
            question: replace_aliases(&cell(2), &CURRENCY_ALIASES),
            priority: cell(3),
            target_audience: cell(4),
            template_answer: cell(5),
        });
    }

    Ok(templates)
}
