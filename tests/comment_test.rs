mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use vistara::{
    domain::{AnnouncementRequest, CreateCommentRequest},
    error::AppError,
    repository::{
        AnnouncementRepository, CommentRepository, SqliteAnnouncementRepository,
        SqliteCommentRepository,
    },
    service::CommentService,
};

#[tokio::test]
async fn test_comments_listed_oldest_first() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let announcements = Arc::new(SqliteAnnouncementRepository::new(pool.clone()));
    let service = CommentService::new(
        Arc::new(SqliteCommentRepository::new(pool.clone())),
        announcements.clone(),
    );
    let now = Utc::now();

    let announcement = announcements.create(AnnouncementRequest {
        content: "Football trials on Saturday".to_string(),
        author_name: "Coach".to_string(),
        ..Default::default()
    }.into_new(now)?).await?;

    let first = service.create(announcement.id, CreateCommentRequest {
        author: "Neha".to_string(),
        text: "What time?".to_string(),
    }, now - Duration::hours(2)).await?;
    service.create(announcement.id, CreateCommentRequest {
        author: "Coach".to_string(),
        text: "9am at the main ground".to_string(),
    }, now).await?;

    let comments = service.list_for_announcement(announcement.id, now).await?;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, first.id);
    assert_eq!(comments[0].formatted_timestamp, "2 hours ago");
    assert_eq!(comments[1].formatted_timestamp, "Just now");

    service.delete(first.id).await?;
    assert_eq!(service.list_for_announcement(announcement.id, now).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_comment_on_missing_announcement() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let service = CommentService::new(
        Arc::new(SqliteCommentRepository::new(pool.clone())),
        Arc::new(SqliteAnnouncementRepository::new(pool.clone())),
    );

    let result = service.create(77, CreateCommentRequest {
        author: "Neha".to_string(),
        text: "Hello?".to_string(),
    }, Utc::now()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert!(matches!(service.list_for_announcement(77, Utc::now()).await, Err(AppError::NotFound(_))));
    assert!(matches!(service.delete(5).await, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_insert_for_vanished_announcement_is_not_found() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let comments = SqliteCommentRepository::new(pool.clone());

    let result = comments.create(404, CreateCommentRequest {
        author: "Neha".to_string(),
        text: "Too late".to_string(),
    }, Utc::now()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
