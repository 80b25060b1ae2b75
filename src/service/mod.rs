pub mod announcement_service;
pub mod comment_service;
pub mod event_service;
pub mod story_service;
pub mod user_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::auth::{AuthService, JwtService};
use crate::config::Settings;
use crate::repository::*;

pub use announcement_service::AnnouncementService;
pub use comment_service::CommentService;
pub use event_service::EventService;
pub use story_service::StoryService;
pub use user_service::UserService;

pub struct ServiceContext {
    pub auth_service: Arc<AuthService>,
    pub announcement_service: Arc<AnnouncementService>,
    pub comment_service: Arc<CommentService>,
    pub story_service: Arc<StoryService>,
    pub event_service: Arc<EventService>,
    pub user_service: Arc<UserService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(db_pool: SqlitePool, settings: &Settings) -> Self {
        // Repositories
        let announcement_repo: Arc<dyn AnnouncementRepository> =
            Arc::new(SqliteAnnouncementRepository::new(db_pool.clone()));
        let comment_repo: Arc<dyn CommentRepository> =
            Arc::new(SqliteCommentRepository::new(db_pool.clone()));
        let story_repo: Arc<dyn StoryRepository> =
            Arc::new(SqliteStoryRepository::new(db_pool.clone()));
        let event_repo: Arc<dyn EventRepository> =
            Arc::new(SqliteEventRepository::new(db_pool.clone()));
        let user_repo: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(db_pool.clone()));
        let token_repo: Arc<dyn TokenRepository> =
            Arc::new(SqliteTokenRepository::new(db_pool.clone()));

        // Services
        let jwt = JwtService::new(&settings.auth.jwt_secret, settings.auth.token_ttl_minutes);
        let auth_service = Arc::new(AuthService::new(user_repo.clone(), token_repo, jwt));
        let announcement_service = Arc::new(AnnouncementService::new(
            announcement_repo.clone(),
            comment_repo.clone(),
        ));
        let comment_service = Arc::new(CommentService::new(comment_repo, announcement_repo));
        let story_service = Arc::new(StoryService::new(story_repo));
        let event_service = Arc::new(EventService::new(event_repo));
        let user_service = Arc::new(UserService::new(user_repo));

        Self {
            auth_service,
            announcement_service,
            comment_service,
            story_service,
            event_service,
            user_service,
            db_pool,
        }
    }
}
