use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    api::{
        state::AppState,
        uploads::{encode_upload, UploadForm},
    },
    domain::{CreateStoryRequest, StoryDto, StoryMediaType},
    error::Result,
};

const MEDIA_TYPES: &[&str] = &["image/", "video/"];

pub async fn list_active(State(state): State<AppState>) -> Result<Json<Vec<StoryDto>>> {
    let stories = state.service_context.story_service
        .list_active(Utc::now())
        .await?;
    Ok(Json(stories))
}

pub async fn list_by_author(
    State(state): State<AppState>,
    Path(author_name): Path<String>,
) -> Result<Json<Vec<StoryDto>>> {
    let stories = state.service_context.story_service
        .list_by_author(&author_name, Utc::now())
        .await?;
    Ok(Json(stories))
}

pub async fn list_expiring(State(state): State<AppState>) -> Result<Json<Vec<StoryDto>>> {
    let stories = state.service_context.story_service
        .list_expiring_soon(Utc::now())
        .await?;
    Ok(Json(stories))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateStoryRequest>,
) -> Result<(StatusCode, Json<StoryDto>)> {
    let story = state.service_context.story_service
        .create(request, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(story)))
}

/// Multipart variant of `create`: the `media` part becomes `mediaContent`.
/// Text stories may send `mediaContent` as a plain field instead.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<StoryDto>)> {
    let form = UploadForm::read(multipart, "media").await?;

    let media_type = match form.text("mediaType") {
        Some(value) => StoryMediaType::parse(&value)?,
        None => StoryMediaType::Image,
    };

    let media_content = match form.file {
        Some(ref file) => encode_upload(file, MEDIA_TYPES, state.settings.uploads.max_file_bytes)?,
        None => form.text("mediaContent").unwrap_or_default(),
    };

    let request = CreateStoryRequest {
        media_content,
        caption: form.text("caption"),
        author_name: form.required_text("authorName")?,
        author_avatar: form.text("authorAvatar"),
        background_color: form.text("backgroundColor"),
        media_type: Some(media_type),
    };

    let story = state.service_context.story_service
        .create(request, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(story)))
}

pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StoryDto>> {
    let story = state.service_context.story_service
        .view(id, Utc::now())
        .await?;
    Ok(Json(story))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.service_context.story_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_expired(State(state): State<AppState>) -> Result<Json<Value>> {
    let deactivated = state.service_context.story_service
        .deactivate_expired(Utc::now())
        .await?;
    Ok(Json(json!({ "deactivated": deactivated })))
}
