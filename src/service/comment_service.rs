use std::sync::Arc;
use chrono::{DateTime, Utc};

use crate::{
    domain::{CommentDto, CreateCommentRequest},
    error::{AppError, Result},
    repository::{AnnouncementRepository, CommentRepository},
};

pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
    announcement_repo: Arc<dyn AnnouncementRepository>,
}

impl CommentService {
    pub fn new(
        repo: Arc<dyn CommentRepository>,
        announcement_repo: Arc<dyn AnnouncementRepository>,
    ) -> Self {
        Self { repo, announcement_repo }
    }

    pub async fn list_for_announcement(
        &self,
        announcement_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<CommentDto>> {
        self.require_announcement(announcement_id).await?;

        let comments = self.repo.find_by_announcement(announcement_id).await?;
        Ok(comments
            .into_iter()
            .map(|c| CommentDto::from_comment(c, now))
            .collect())
    }

    /// The timestamp is always `now`; comments are never edited afterwards.
    pub async fn create(
        &self,
        announcement_id: i64,
        request: CreateCommentRequest,
        now: DateTime<Utc>,
    ) -> Result<CommentDto> {
        request.validate()?;
        self.require_announcement(announcement_id).await?;

        let comment = self.repo.create(announcement_id, request, now).await?;

        tracing::debug!(
            "Comment {} added to announcement {}",
            comment.id,
            announcement_id
        );

        Ok(CommentDto::from_comment(comment, now))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(format!("Comment not found with id: {}", id)));
        }
        Ok(())
    }

    async fn require_announcement(&self, announcement_id: i64) -> Result<()> {
        if !self.announcement_repo.exists(announcement_id).await? {
            return Err(AppError::NotFound(format!(
                "Announcement not found with id: {}",
                announcement_id
            )));
        }
        Ok(())
    }
}
