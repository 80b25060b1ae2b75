use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Event, EventRequest},
    error::Result,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    let events = state.service_context.event_service.list().await?;
    Ok(Json(events))
}

pub async fn list_approved(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    let events = state.service_context.event_service.list_approved().await?;
    Ok(Json(events))
}

pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Event>>> {
    let events = state.service_context.event_service
        .list_by_category(&category)
        .await?;
    Ok(Json(events))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Event>> {
    let event = state.service_context.event_service.get(id).await?;
    Ok(Json(event))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<EventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = state.service_context.event_service.create(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(current_user): Extension<CurrentUser>,
    Json(request): Json<EventRequest>,
) -> Result<Json<Event>> {
    let event = state.service_context.event_service
        .update(id, request, &current_user.user)
        .await?;
    Ok(Json(event))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.service_context.event_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Event>> {
    let event = state.service_context.event_service.approve(id).await?;
    Ok(Json(event))
}
