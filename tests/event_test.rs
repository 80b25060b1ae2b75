mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use vistara::{
    domain::{EventRequest, User, ROLE_ADMIN, ROLE_USER},
    error::AppError,
    repository::SqliteEventRepository,
    service::EventService,
};

fn request(name: &str, category: &str) -> EventRequest {
    let start = Utc::now() + Duration::days(1);
    EventRequest {
        name: name.to_string(),
        category: Some(category.to_string()),
        start_date_time: Some(start),
        end_date_time: Some(start + Duration::hours(2)),
        location: Some("Auditorium".to_string()),
        ..Default::default()
    }
}

fn user_with_roles(roles: &[&str]) -> User {
    User {
        id: 1,
        name: "Organiser".to_string(),
        email: "organiser@example.com".to_string(),
        phone: None,
        account_locked: false,
        enabled: true,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_new_events_need_approval() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let service = EventService::new(Arc::new(SqliteEventRepository::new(pool.clone())));

    let event = service.create(EventRequest {
        is_approved: true,
        ..request("Hackathon", "tech")
    }).await?;
    assert!(!event.is_approved);
    assert!(service.list_approved().await?.is_empty());

    let approved = service.approve(event.id).await?;
    assert!(approved.is_approved);
    assert_eq!(service.list_approved().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_event_update_and_category_filter() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let service = EventService::new(Arc::new(SqliteEventRepository::new(pool.clone())));

    let dance = service.create(request("Dance Night", "cultural")).await?;
    service.create(request("Code Sprint", "tech")).await?;

    let updated = service.update(dance.id, EventRequest {
        location: Some("Open Air Theatre".to_string()),
        ..request("Dance Night", "cultural")
    }, &user_with_roles(&[ROLE_USER])).await?;
    assert_eq!(updated.location.as_deref(), Some("Open Air Theatre"));

    let cultural = service.list_by_category("cultural").await?;
    assert_eq!(cultural.len(), 1);
    assert_eq!(cultural[0].id, dance.id);
    assert_eq!(service.list().await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_missing_event_is_not_found() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let service = EventService::new(Arc::new(SqliteEventRepository::new(pool.clone())));

    assert!(matches!(service.get(3).await, Err(AppError::NotFound(_))));
    assert!(matches!(service.delete(3).await, Err(AppError::NotFound(_))));
    assert!(matches!(service.approve(3).await, Err(AppError::NotFound(_))));
    let admin = user_with_roles(&[ROLE_USER, ROLE_ADMIN]);
    assert!(matches!(service.update(3, request("Ghost", "none"), &admin).await, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_event_cannot_end_before_start() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let service = EventService::new(Arc::new(SqliteEventRepository::new(pool.clone())));

    let start = Utc::now();
    let result = service.create(EventRequest {
        start_date_time: Some(start),
        end_date_time: Some(start - Duration::hours(1)),
        ..request("Backwards", "tech")
    }).await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

#[tokio::test]
async fn test_only_admins_change_approval_on_update() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let service = EventService::new(Arc::new(SqliteEventRepository::new(pool.clone())));
    let member = user_with_roles(&[ROLE_USER]);
    let admin = user_with_roles(&[ROLE_USER, ROLE_ADMIN]);

    let event = service.create(request("Poetry Slam", "cultural")).await?;

    let attempted = service.update(event.id, EventRequest {
        is_approved: true,
        ..request("Poetry Slam", "cultural")
    }, &member).await?;
    assert!(!attempted.is_approved);
    assert!(service.list_approved().await?.is_empty());

    service.approve(event.id).await?;
    let edited = service.update(event.id, request("Poetry Slam Finals", "cultural"), &member).await?;
    assert!(edited.is_approved);
    assert_eq!(edited.name, "Poetry Slam Finals");

    let withdrawn = service.update(event.id, request("Poetry Slam Finals", "cultural"), &admin).await?;
    assert!(!withdrawn.is_approved);

    Ok(())
}
