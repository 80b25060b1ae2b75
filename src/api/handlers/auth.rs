use axum::{extract::State, Json};

use crate::{
    api::state::AppState,
    domain::{AuthResponse, LoginRequest, RegisterRequest},
    error::Result,
};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let response = state.service_context.auth_service.register(request).await?;
    Ok(Json(response))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let response = state.service_context.auth_service.login(request).await?;
    Ok(Json(response))
}
