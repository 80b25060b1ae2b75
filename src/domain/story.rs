use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Stories stop being visible this long after creation.
pub const STORY_LIFETIME_HOURS: i64 = 24;

pub const MAX_CAPTION_LENGTH: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: i64,
    /// Base64 encoded image or video.
    pub media_content: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub active: bool,
    pub background_color: Option<String>,
    pub media_type: StoryMediaType,
    pub views: i64,
}

impl Story {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.active && !self.is_expired_at(now)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoryMediaType {
    #[default]
    Image,
    Video,
    Text,
}

impl StoryMediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryMediaType::Image => "image",
            StoryMediaType::Video => "video",
            StoryMediaType::Text => "text",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "image" => Ok(StoryMediaType::Image),
            "video" => Ok(StoryMediaType::Video),
            "text" => Ok(StoryMediaType::Text),
            _ => Err(AppError::Validation(format!(
                "Invalid media type: {}. Expected image, video or text",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryRequest {
    pub media_content: String,
    pub caption: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub background_color: Option<String>,
    pub media_type: Option<StoryMediaType>,
}

#[derive(Debug, Clone)]
pub struct NewStory {
    pub media_content: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub background_color: Option<String>,
    pub media_type: StoryMediaType,
}

impl NewStory {
    /// A fresh story created at `now`, expiring a day later.
    pub fn from_request(request: CreateStoryRequest, now: DateTime<Utc>) -> Result<Self> {
        if request.author_name.trim().is_empty() {
            return Err(AppError::Validation("Author name is required".to_string()));
        }
        let media_type = request.media_type.unwrap_or_default();
        if request.media_content.is_empty() && media_type != StoryMediaType::Text {
            return Err(AppError::Validation("Media content is required".to_string()));
        }
        if let Some(ref caption) = request.caption {
            if caption.chars().count() > MAX_CAPTION_LENGTH {
                return Err(AppError::Validation(format!(
                    "Caption must be at most {} characters",
                    MAX_CAPTION_LENGTH
                )));
            }
        }

        Ok(Self {
            media_content: request.media_content,
            caption: request.caption,
            created_at: now,
            expires_at: now + Duration::hours(STORY_LIFETIME_HOURS),
            author_name: request.author_name,
            author_avatar: request.author_avatar,
            background_color: request.background_color,
            media_type,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDto {
    pub id: i64,
    pub media_content: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub active: bool,
    pub background_color: Option<String>,
    pub media_type: StoryMediaType,
    pub views: i64,
    pub viewed: bool,
}

impl StoryDto {
    /// `active` is reported false once the story has expired, even if the
    /// row has not been swept yet.
    pub fn from_story(story: Story, now: DateTime<Utc>) -> Self {
        let active = story.is_active_at(now);
        Self {
            id: story.id,
            media_content: story.media_content,
            caption: story.caption,
            created_at: story.created_at,
            expires_at: story.expires_at,
            author_name: story.author_name,
            author_avatar: story.author_avatar,
            active,
            background_color: story.background_color,
            media_type: story.media_type,
            views: story.views,
            viewed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story_created_at(created_at: DateTime<Utc>) -> Story {
        let new = NewStory::from_request(
            CreateStoryRequest {
                media_content: "aGVsbG8=".to_string(),
                author_name: "maya".to_string(),
                ..Default::default()
            },
            created_at,
        )
        .unwrap();

        Story {
            id: 1,
            media_content: new.media_content,
            caption: new.caption,
            created_at: new.created_at,
            expires_at: new.expires_at,
            author_name: new.author_name,
            author_avatar: new.author_avatar,
            active: true,
            background_color: new.background_color,
            media_type: new.media_type,
            views: 0,
        }
    }

    #[test]
    fn test_expires_a_day_after_creation() {
        let t = Utc::now();
        let story = story_created_at(t);
        assert_eq!(story.expires_at - story.created_at, Duration::hours(24));
    }

    #[test]
    fn test_active_window() {
        let t = Utc::now();
        let story = story_created_at(t);
        assert!(story.is_active_at(t + Duration::hours(1)));
        assert!(!story.is_active_at(t + Duration::hours(25)));
    }

    #[test]
    fn test_explicitly_deactivated_story_is_inactive() {
        let t = Utc::now();
        let mut story = story_created_at(t);
        story.active = false;
        assert!(!story.is_active_at(t + Duration::minutes(5)));
    }

    #[test]
    fn test_dto_reports_expired_story_inactive() {
        let t = Utc::now();
        let story = story_created_at(t);
        let dto = StoryDto::from_story(story, t + Duration::hours(30));
        assert!(!dto.active);
    }

    #[test]
    fn test_caption_length_limit() {
        let request = CreateStoryRequest {
            media_content: "aGVsbG8=".to_string(),
            author_name: "maya".to_string(),
            caption: Some("x".repeat(MAX_CAPTION_LENGTH + 1)),
            ..Default::default()
        };
        assert!(matches!(
            NewStory::from_request(request, Utc::now()),
            Err(AppError::Validation(_))
        ));
    }
}
