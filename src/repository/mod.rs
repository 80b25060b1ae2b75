use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod comment_repository;
pub mod story_repository;
pub mod event_repository;
pub mod user_repository;
pub mod token_repository;

pub use announcement_repository::SqliteAnnouncementRepository;
pub use comment_repository::SqliteCommentRepository;
pub use story_repository::SqliteStoryRepository;
pub use event_repository::SqliteEventRepository;
pub use user_repository::SqliteUserRepository;
pub use token_repository::SqliteTokenRepository;

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>>;
    async fn exists(&self, id: i64) -> Result<bool>;
    async fn list(&self) -> Result<Vec<Announcement>>;
    /// Read, apply and write back in one transaction. `None` if the row is gone.
    async fn update(&self, id: i64, request: AnnouncementRequest) -> Result<Option<Announcement>>;
    async fn increment_likes(&self, id: i64) -> Result<Option<Announcement>>;
    /// Returns false when nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(
        &self,
        announcement_id: i64,
        request: CreateCommentRequest,
        timestamp: DateTime<Utc>,
    ) -> Result<Comment>;
    async fn find_by_announcement(&self, announcement_id: i64) -> Result<Vec<Comment>>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Outcome of recording a view against a story.
#[derive(Debug, Clone)]
pub enum StoryView {
    Viewed(Story),
    Expired,
}

#[async_trait]
pub trait StoryRepository: Send + Sync {
    async fn create(&self, story: NewStory) -> Result<Story>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Story>>;
    /// Active, unexpired stories, newest first.
    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Story>>;
    async fn list_active_by_author(&self, author_name: &str, now: DateTime<Utc>) -> Result<Vec<Story>>;
    /// Active stories whose expiry falls inside `[start, end]`.
    async fn list_expiring_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Story>>;
    /// Increments the view counter, or deactivates the story if it has expired.
    async fn record_view(&self, id: i64, now: DateTime<Utc>) -> Result<Option<StoryView>>;
    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<u64>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: EventRequest) -> Result<Event>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>>;
    async fn list(&self) -> Result<Vec<Event>>;
    async fn list_approved(&self) -> Result<Vec<Event>>;
    async fn list_by_category(&self, category: &str) -> Result<Vec<Event>>;
    /// `approval` of `None` keeps the stored flag.
    async fn update(&self, id: i64, event: EventRequest, approval: Option<bool>) -> Result<Option<Event>>;
    async fn approve(&self, id: i64) -> Result<Option<Event>>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Insert shape for a user whose password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: String,
}

/// Field changes for a user; the password, if any, is already hashed.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_password_hash(&self, email: &str) -> Result<Option<String>>;
    async fn list(&self) -> Result<Vec<User>>;
    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
    async fn add_role(&self, id: i64, role: &str) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn save(&self, user_id: i64, token: &str, created_at: DateTime<Utc>) -> Result<Token>;
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Token>>;
}
