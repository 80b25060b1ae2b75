use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{UpdateUserRequest, User},
    error::Result,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.service_context.user_service.list().await?;
    Ok(Json(users))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>> {
    let user = state.service_context.user_service.get(id).await?;
    Ok(Json(user))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(current_user): Extension<CurrentUser>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    let user = state.service_context.user_service
        .update(&current_user.user, id, request)
        .await?;
    Ok(Json(user))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<StatusCode> {
    state.service_context.user_service
        .delete(&current_user.user, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
