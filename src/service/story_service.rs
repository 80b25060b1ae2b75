use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};

use crate::{
    domain::{CreateStoryRequest, NewStory, StoryDto},
    error::{AppError, Result},
    repository::{StoryRepository, StoryView},
};

/// How far ahead `list_expiring_soon` looks.
const EXPIRING_SOON_WINDOW_MINUTES: i64 = 60;

pub struct StoryService {
    repo: Arc<dyn StoryRepository>,
}

impl StoryService {
    pub fn new(repo: Arc<dyn StoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<StoryDto>> {
        let stories = self.repo.list_active(now).await?;
        Ok(stories.into_iter().map(|s| StoryDto::from_story(s, now)).collect())
    }

    pub async fn list_by_author(&self, author_name: &str, now: DateTime<Utc>) -> Result<Vec<StoryDto>> {
        let stories = self.repo.list_active_by_author(author_name, now).await?;
        Ok(stories.into_iter().map(|s| StoryDto::from_story(s, now)).collect())
    }

    pub async fn list_expiring_soon(&self, now: DateTime<Utc>) -> Result<Vec<StoryDto>> {
        let until = now + Duration::minutes(EXPIRING_SOON_WINDOW_MINUTES);
        let stories = self.repo.list_expiring_between(now, until).await?;
        Ok(stories.into_iter().map(|s| StoryDto::from_story(s, now)).collect())
    }

    pub async fn create(&self, request: CreateStoryRequest, now: DateTime<Utc>) -> Result<StoryDto> {
        let story = self.repo.create(NewStory::from_request(request, now)?).await?;

        tracing::info!(
            "Created story {} by {}, expires at {}",
            story.id,
            story.author_name,
            story.expires_at
        );

        Ok(StoryDto::from_story(story, now))
    }

    /// Counts a view. An expired story is deactivated and the view fails.
    pub async fn view(&self, id: i64, now: DateTime<Utc>) -> Result<StoryDto> {
        match self.repo.record_view(id, now).await? {
            Some(StoryView::Viewed(story)) => Ok(StoryDto::from_story(story, now)),
            Some(StoryView::Expired) => {
                tracing::debug!("Story {} viewed after expiry", id);
                Err(AppError::NotFound("Story has expired".to_string()))
            }
            None => Err(not_found(id)),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!("Deleted story {}", id);
        Ok(())
    }

    /// Marks every story past its expiry as inactive.
    pub async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let count = self.repo.deactivate_expired(now).await?;
        if count > 0 {
            tracing::info!("Deactivated {} expired stories", count);
        }
        Ok(count)
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Story not found with id: {}", id))
}
