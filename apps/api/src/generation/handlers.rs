//! Axum route handlers for prompt preview and generation.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompt_builder::build_prompt;
use crate::models::prompt::PromptMessage;
use crate::state::AppState;

/// Optional so a missing parameter surfaces as `AppError::Validation`.
#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub brief_id: Option<String>,
    pub task: Option<String>,
}

impl GenerateQuery {
    /// Returns `(brief_id, task)` once both are present and non-blank.
    fn validate(&self) -> Result<(&str, &str), AppError> {
        Ok((
            required_param(self.brief_id.as_deref(), "brief_id")?,
            required_param(self.task.as_deref(), "task")?,
        ))
    }
}

fn required_param<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    match value {
        None => Err(AppError::Validation(format!("{name} is required"))),
        Some(v) if v.trim().is_empty() => {
            Err(AppError::Validation(format!("{name} cannot be empty")))
        }
        Some(v) => Ok(v),
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub output: String,
}

/// GET /generate?brief_id=...&task=...
///
/// Failures are returned as error statuses (404, 500, 502) with the standard
/// error body, never as a 200 carrying an error message.
pub async fn handle_generate(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<GenerateResponse>, AppError> {
    let (brief_id, task) = query.validate()?;

    let messages = build_prompt(&state.store, &state.context, brief_id, task).await?;

    let output = state
        .llm
        .complete(&messages)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    info!(
        "Generated {} chars for brief {} (task: {})",
        output.len(),
        brief_id,
        task
    );

    Ok(Json(GenerateResponse { output }))
}

/// GET /prompt?brief_id=...&task=...
///
/// Returns the assembled messages without calling the completion API.
pub async fn handle_preview_prompt(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<Vec<PromptMessage>>, AppError> {
    let (brief_id, task) = query.validate()?;
    let messages = build_prompt(&state.store, &state.context, brief_id, task).await?;
    Ok(Json(messages))
}
