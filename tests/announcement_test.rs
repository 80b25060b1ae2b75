mod common;

use chrono::{Duration, Utc};
use vistara::{
    domain::{AnnouncementMediaType, AnnouncementRequest, CreateCommentRequest},
    error::AppError,
    repository::{
        AnnouncementRepository, CommentRepository, SqliteAnnouncementRepository,
        SqliteCommentRepository,
    },
};

fn request(content: &str) -> AnnouncementRequest {
    AnnouncementRequest {
        content: content.to_string(),
        author_name: "Asha".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_announcement_crud() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteAnnouncementRepository::new(pool.clone());
    let now = Utc::now();

    let created = repo.create(request("Library hours extended").into_new(now)?).await?;
    assert_eq!(created.likes, 0);
    assert_eq!(created.media_type, AnnouncementMediaType::Image);
    assert!(created.background_color.is_none());

    let found = repo.find_by_id(created.id).await?;
    assert_eq!(found.map(|a| a.content), Some("Library hours extended".to_string()));

    let updated = repo.update(created.id, AnnouncementRequest {
        content: "Library hours extended to 10pm".to_string(),
        author_name: "Asha".to_string(),
        media_type: Some(AnnouncementMediaType::Text),
        background_color: Some("#112233".to_string()),
        ..Default::default()
    }).await?.expect("announcement exists");
    assert_eq!(updated.content, "Library hours extended to 10pm");
    assert_eq!(updated.media_type, AnnouncementMediaType::Text);
    assert_eq!(updated.background_color.as_deref(), Some("#112233"));
    assert_eq!(updated.likes, 0);

    assert!(repo.delete(created.id).await?);
    assert!(repo.find_by_id(created.id).await?.is_none());
    assert!(!repo.delete(created.id).await?);

    Ok(())
}

#[tokio::test]
async fn test_list_is_newest_first() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteAnnouncementRepository::new(pool.clone());
    let now = Utc::now();

    repo.create(request("older").into_new(now - Duration::days(1))?).await?;
    repo.create(request("newer").into_new(now)?).await?;

    let contents: Vec<String> = repo.list().await?.into_iter().map(|a| a.content).collect();
    assert_eq!(contents, vec!["newer".to_string(), "older".to_string()]);

    Ok(())
}

#[tokio::test]
async fn test_likes_increment_by_one_each_time() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteAnnouncementRepository::new(pool.clone());

    let created = repo.create(request("Like me").into_new(Utc::now())?).await?;

    for _ in 0..5 {
        repo.increment_likes(created.id).await?;
    }

    let liked = repo.find_by_id(created.id).await?.expect("announcement exists");
    assert_eq!(liked.likes, 5);

    assert!(repo.increment_likes(9999).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_deleting_announcement_removes_comments() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let announcements = SqliteAnnouncementRepository::new(pool.clone());
    let comments = SqliteCommentRepository::new(pool.clone());
    let now = Utc::now();

    let announcement = announcements.create(request("Discuss").into_new(now)?).await?;
    let comment = comments.create(announcement.id, CreateCommentRequest {
        author: "Ravi".to_string(),
        text: "Count me in".to_string(),
    }, now).await?;

    announcements.delete(announcement.id).await?;

    assert!(comments.find_by_announcement(announcement.id).await?.is_empty());
    assert!(!comments.delete(comment.id).await?);

    Ok(())
}

#[tokio::test]
async fn test_negative_likes_rejected() -> anyhow::Result<()> {
    let result = AnnouncementRequest {
        likes: Some(-1),
        ..request("Nope")
    }
    .into_new(Utc::now());

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}
