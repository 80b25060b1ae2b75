use std::sync::Arc;
use chrono::{DateTime, Utc};

use crate::{
    domain::{Announcement, AnnouncementDto, AnnouncementRequest, CommentDto},
    error::{AppError, Result},
    repository::{AnnouncementRepository, CommentRepository},
};

pub struct AnnouncementService {
    repo: Arc<dyn AnnouncementRepository>,
    comment_repo: Arc<dyn CommentRepository>,
}

impl AnnouncementService {
    pub fn new(
        repo: Arc<dyn AnnouncementRepository>,
        comment_repo: Arc<dyn CommentRepository>,
    ) -> Self {
        Self { repo, comment_repo }
    }

    pub async fn list(&self, now: DateTime<Utc>) -> Result<Vec<AnnouncementDto>> {
        let announcements = self.repo.list().await?;

        let mut dtos = Vec::with_capacity(announcements.len());
        for announcement in announcements {
            dtos.push(self.to_dto(announcement, now).await?);
        }

        Ok(dtos)
    }

    pub async fn get(&self, id: i64, now: DateTime<Utc>) -> Result<AnnouncementDto> {
        let announcement = self.repo.find_by_id(id).await?
            .ok_or_else(|| not_found(id))?;

        self.to_dto(announcement, now).await
    }

    pub async fn create(&self, request: AnnouncementRequest, now: DateTime<Utc>) -> Result<AnnouncementDto> {
        let announcement = self.repo.create(request.into_new(now)?).await?;

        tracing::info!(
            "Created announcement {} by {}",
            announcement.id,
            announcement.author_name
        );

        Ok(AnnouncementDto::new(announcement, Vec::new()))
    }

    pub async fn update(
        &self,
        id: i64,
        request: AnnouncementRequest,
        now: DateTime<Utc>,
    ) -> Result<AnnouncementDto> {
        let announcement = self.repo.update(id, request).await?
            .ok_or_else(|| not_found(id))?;

        tracing::debug!("Updated announcement {}", id);

        self.to_dto(announcement, now).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!("Deleted announcement {}", id);
        Ok(())
    }

    /// Adds one like. Callers are not tracked, so repeated likes all count.
    pub async fn like(&self, id: i64, now: DateTime<Utc>) -> Result<AnnouncementDto> {
        let announcement = self.repo.increment_likes(id).await?
            .ok_or_else(|| not_found(id))?;

        self.to_dto(announcement, now).await
    }

    async fn to_dto(&self, announcement: Announcement, now: DateTime<Utc>) -> Result<AnnouncementDto> {
        let comments = self.comment_repo
            .find_by_announcement(announcement.id)
            .await?
            .into_iter()
            .map(|c| CommentDto::from_comment(c, now))
            .collect();

        Ok(AnnouncementDto::new(announcement, comments))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Announcement not found with id: {}", id))
}
