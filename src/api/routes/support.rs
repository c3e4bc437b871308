use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::domain::{DomainError, SuggestionResult, TemplateEdit};

#[derive(Debug, Deserialize)]
pub struct SubmitQuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question: String,
    pub standalone_question: String,
    pub category: String,
    pub subcategory: String,
    pub suggested_responses: Vec<SuggestedResponse>,
}

#[derive(Debug, Serialize)]
pub struct SuggestedResponse {
    pub id: String,
    pub response: String,
    pub relevance: i32,
}

impl From<SuggestionResult> for SuggestedResponse {
    fn from(result: SuggestionResult) -> Self {
        Self {
            id: result.id,
            response: result.template.template_answer,
            relevance: result.relevance_percent,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    pub standalone_question: String,
    pub selected_responses: Vec<SelectedResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedResponse {
    pub id: String,
    pub modified_response: String,
}

pub async fn submit_question(
    State(state): State<AppState>,
    Json(request): Json<SubmitQuestionRequest>,
) -> Result<Json<QuestionResponse>, StatusCode> {
    let suggestions = state
        .suggestions
        .suggest(&request.question)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Suggestion pipeline failed");
            error_status(&e)
        })?;

    // category/subcategory follow the nearest hit; empty when nothing matched
    let (category, subcategory) = suggestions
        .entries
        .first()
        .map(|top| {
            (
                top.template.main_category.clone(),
                top.template.sub_category.clone(),
            )
        })
        .unwrap_or_default();

    Ok(Json(QuestionResponse {
        question: request.question,
        standalone_question: suggestions.standalone_question,
        category,
        subcategory,
        suggested_responses: suggestions
            .entries
            .into_iter()
            .map(SuggestedResponse::from)
            .collect(),
    }))
}

pub async fn submit_response(
    State(state): State<AppState>,
    Path(_question_id): Path<String>,
    Json(request): Json<SubmitResponseRequest>,
) -> Result<StatusCode, StatusCode> {
    let edits: Vec<TemplateEdit> = request
        .selected_responses
        .into_iter()
        .map(|r| TemplateEdit {
            template_id: r.id,
            new_answer: r.modified_response,
        })
        .collect();

    state
        .submissions
        .add_new_templates(&request.standalone_question, &edits)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Response submission failed");
            error_status(&e)
        })?;

    Ok(StatusCode::NO_CONTENT)
}

fn error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        DomainError::ExternalService(_) | DomainError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
