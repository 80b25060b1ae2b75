use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::CommentDto;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub content: String,
    pub start_date: DateTime<Utc>,
    /// Base64 encoded image.
    pub image: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub likes: i64,
    /// Only meaningful for text posts.
    pub background_color: Option<String>,
    pub media_type: AnnouncementMediaType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementMediaType {
    #[default]
    Image,
    Text,
}

impl AnnouncementMediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementMediaType::Image => "image",
            AnnouncementMediaType::Text => "text",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "image" => Ok(AnnouncementMediaType::Image),
            "text" => Ok(AnnouncementMediaType::Text),
            _ => Err(AppError::Validation(format!(
                "Invalid media type: {}. Expected image or text",
                s
            ))),
        }
    }
}

/// Row data for an announcement that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub content: String,
    pub start_date: DateTime<Utc>,
    pub image: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub likes: i64,
    pub background_color: Option<String>,
    pub media_type: AnnouncementMediaType,
}

/// Request body shared by create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementRequest {
    pub content: String,
    pub start_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub likes: Option<i64>,
    pub background_color: Option<String>,
    pub media_type: Option<AnnouncementMediaType>,
}

impl AnnouncementRequest {
    fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(AppError::Validation("Content is required".to_string()));
        }
        if self.author_name.trim().is_empty() {
            return Err(AppError::Validation("Author name is required".to_string()));
        }
        if let Some(likes) = self.likes {
            if likes < 0 {
                return Err(AppError::Validation("Likes cannot be negative".to_string()));
            }
        }
        Ok(())
    }

    /// Builds the row to insert. `startDate` falls back to `now`.
    pub fn into_new(self, now: DateTime<Utc>) -> Result<NewAnnouncement> {
        self.validate()?;

        let media_type = self.media_type.unwrap_or_default();
        let background_color = match media_type {
            AnnouncementMediaType::Text => self.background_color,
            AnnouncementMediaType::Image => None,
        };

        Ok(NewAnnouncement {
            content: self.content,
            start_date: self.start_date.unwrap_or(now),
            image: self.image,
            author_name: self.author_name,
            author_avatar: self.author_avatar,
            likes: self.likes.unwrap_or(0),
            background_color,
            media_type,
        })
    }
}

impl Announcement {
    /// Applies an update request. Optional media fields are only replaced
    /// when present; the background colour follows a text media type.
    pub fn apply(&mut self, request: AnnouncementRequest) -> Result<()> {
        request.validate()?;

        self.content = request.content;
        if let Some(start_date) = request.start_date {
            self.start_date = start_date;
        }
        if let Some(image) = request.image {
            self.image = Some(image);
        }
        self.author_name = request.author_name;
        if let Some(avatar) = request.author_avatar {
            self.author_avatar = Some(avatar);
        }
        if let Some(media_type) = request.media_type {
            self.media_type = media_type;
            if media_type == AnnouncementMediaType::Text {
                self.background_color = request.background_color;
            }
        }
        if let Some(likes) = request.likes {
            self.likes = likes;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDto {
    pub id: i64,
    pub content: String,
    pub start_date: DateTime<Utc>,
    pub image: Option<String>,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub likes: i64,
    pub background_color: Option<String>,
    pub media_type: AnnouncementMediaType,
    pub comments: Vec<CommentDto>,
}

impl AnnouncementDto {
    pub fn new(announcement: Announcement, comments: Vec<CommentDto>) -> Self {
        Self {
            id: announcement.id,
            content: announcement.content,
            start_date: announcement.start_date,
            image: announcement.image,
            author_name: announcement.author_name,
            author_avatar: announcement.author_avatar,
            likes: announcement.likes,
            background_color: announcement.background_color,
            media_type: announcement.media_type,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AnnouncementRequest {
        AnnouncementRequest {
            content: "Campus fair on Friday".to_string(),
            author_name: "Student Council".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_on_create() {
        let now = Utc::now();
        let new = request().into_new(now).unwrap();
        assert_eq!(new.start_date, now);
        assert_eq!(new.likes, 0);
        assert_eq!(new.media_type, AnnouncementMediaType::Image);
    }

    #[test]
    fn test_background_color_only_for_text() {
        let mut req = request();
        req.background_color = Some("#ff0000".to_string());
        let image_post = req.clone().into_new(Utc::now()).unwrap();
        assert!(image_post.background_color.is_none());

        req.media_type = Some(AnnouncementMediaType::Text);
        let text_post = req.into_new(Utc::now()).unwrap();
        assert_eq!(text_post.background_color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_negative_likes_rejected() {
        let mut req = request();
        req.likes = Some(-1);
        assert!(matches!(req.into_new(Utc::now()), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_media_type_parse() {
        assert_eq!(AnnouncementMediaType::parse("text").unwrap(), AnnouncementMediaType::Text);
        assert!(AnnouncementMediaType::parse("video").is_err());
    }
}
