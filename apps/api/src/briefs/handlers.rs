use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::brief::{ProductBrief, ProductBriefInput};
use crate::state::AppState;

/// POST /api/briefs
pub async fn handle_create_brief(
    State(state): State<AppState>,
    Json(input): Json<ProductBriefInput>,
) -> Result<(StatusCode, Json<ProductBrief>), AppError> {
    let brief = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(brief)))
}

/// GET /api/briefs
///
/// Briefs whose files cannot be parsed are left out of the response.
pub async fn handle_list_briefs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductBrief>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/briefs/:id
pub async fn handle_get_brief(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductBrief>, AppError> {
    Ok(Json(state.store.get(&id).await?))
}

/// PUT /api/briefs/:id
pub async fn handle_update_brief(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProductBriefInput>,
) -> Result<Json<ProductBrief>, AppError> {
    Ok(Json(state.store.update(&id, input).await?))
}

/// DELETE /api/briefs/:id
pub async fn handle_delete_brief(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
