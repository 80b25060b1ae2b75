use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    api::{
        state::AppState,
        uploads::{encode_upload, UploadForm},
    },
    domain::{AnnouncementDto, AnnouncementMediaType, AnnouncementRequest},
    error::Result,
};

const IMAGE_TYPES: &[&str] = &["image/"];

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AnnouncementDto>>> {
    let announcements = state.service_context.announcement_service
        .list(Utc::now())
        .await?;
    Ok(Json(announcements))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AnnouncementDto>> {
    let announcement = state.service_context.announcement_service
        .get(id, Utc::now())
        .await?;
    Ok(Json(announcement))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<AnnouncementRequest>,
) -> Result<(StatusCode, Json<AnnouncementDto>)> {
    let announcement = state.service_context.announcement_service
        .create(request, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// Multipart variant of `create`. The `image` part is only stored for image posts.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AnnouncementDto>)> {
    let form = UploadForm::read(multipart, "image").await?;

    let media_type = match form.text("mediaType") {
        Some(value) => AnnouncementMediaType::parse(&value)?,
        None => AnnouncementMediaType::Image,
    };

    let image = match (&form.file, media_type) {
        (Some(file), AnnouncementMediaType::Image) => Some(encode_upload(
            file,
            IMAGE_TYPES,
            state.settings.uploads.max_file_bytes,
        )?),
        _ => None,
    };

    let request = AnnouncementRequest {
        content: form.required_text("content")?,
        author_name: form.required_text("authorName")?,
        author_avatar: form.text("authorAvatar"),
        background_color: form.text("backgroundColor"),
        media_type: Some(media_type),
        image,
        ..Default::default()
    };

    let announcement = state.service_context.announcement_service
        .create(request, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AnnouncementRequest>,
) -> Result<Json<AnnouncementDto>> {
    let announcement = state.service_context.announcement_service
        .update(id, request, Utc::now())
        .await?;
    Ok(Json(announcement))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.service_context.announcement_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AnnouncementDto>> {
    let announcement = state.service_context.announcement_service
        .like(id, Utc::now())
        .await?;
    Ok(Json(announcement))
}
