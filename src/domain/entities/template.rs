use serde::{Deserialize, Serialize};

/// One FAQ answer template as imported from the support knowledge base.
///
/// Field names keep the camelCase spelling of the source export so the
/// stored metadata and the HTTP payloads stay byte-compatible with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqTemplate {
    pub main_category: String,
    pub sub_category: String,
    pub question: String,
    pub priority: String,
    pub target_audience: String,
    pub template_answer: String,
}

impl FaqTemplate {
    /// Copy of this template with a different answer text, used when an
    /// operator submits a corrected variant.
    pub fn with_answer(&self, answer: impl Into<String>) -> Self {
        Self {
            template_answer: answer.into(),
            ..self.clone()
        }
    }
}

/// A template as persisted in the vector store: the canonical question
/// text that was embedded, plus the template metadata. The embedding
/// itself stays inside the store and is never read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub id: u64,
    pub content: String,
    pub metadata: FaqTemplate,
}

/// A document not yet persisted; the store assigns the id on insert.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub content: String,
    pub metadata: FaqTemplate,
}

impl NewDocument {
    pub fn new(content: impl Into<String>, metadata: FaqTemplate) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

/// A similarity-search hit. Distance is the store's metric (cosine),
/// lower = more similar; hits arrive ordered by distance ascending.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: IndexedDocument,
    pub distance: f32,
}

/// One ranked suggestion handed to the operator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResult {
    pub id: String,
    #[serde(flatten)]
    pub template: FaqTemplate,
    pub relevance_percent: i32,
}

impl SuggestionResult {
    pub fn from_hit(hit: ScoredDocument) -> Self {
        Self {
            id: hit.document.id.to_string(),
            template: hit.document.metadata,
            relevance_percent: relevance_percent(hit.distance),
        }
    }
}

/// One operator edit inside a submission: the template it started from
/// and the approved answer text.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateEdit {
    pub template_id: String,
    pub new_answer: String,
}

/// Converts a cosine distance into the display percentage.
///
/// Distance 0.0 maps to 100, 1.0 to 0. The raw formula can leave [0, 100]
/// for distances outside [0, 1], so the result is clamped.
pub fn relevance_percent(distance: f32) -> i32 {
    (((1.0 - distance) * 100.0).round() as i32).clamp(0, 100)
}
