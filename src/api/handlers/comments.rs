use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    api::state::AppState,
    domain::{CommentDto, CreateCommentRequest},
    error::Result,
};

pub async fn list(
    State(state): State<AppState>,
    Path(announcement_id): Path<i64>,
) -> Result<Json<Vec<CommentDto>>> {
    let comments = state.service_context.comment_service
        .list_for_announcement(announcement_id, Utc::now())
        .await?;
    Ok(Json(comments))
}

pub async fn create(
    State(state): State<AppState>,
    Path(announcement_id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentDto>)> {
    let comment = state.service_context.comment_service
        .create(announcement_id, request, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.service_context.comment_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
