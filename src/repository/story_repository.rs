use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};

use crate::{
    domain::{NewStory, Story, StoryMediaType},
    error::{AppError, Result},
    repository::{StoryRepository, StoryView},
};

#[derive(FromRow)]
struct StoryRow {
    id: i64,
    media_content: String,
    caption: Option<String>,
    created_at: NaiveDateTime,
    expires_at: NaiveDateTime,
    author_name: String,
    author_avatar: Option<String>,
    active: bool,
    background_color: Option<String>,
    media_type: String,
    views: i64,
}

pub struct SqliteStoryRepository {
    pool: SqlitePool,
}

impl SqliteStoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_story(row: StoryRow) -> Result<Story> {
        Ok(Story {
            id: row.id,
            media_content: row.media_content,
            caption: row.caption,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            expires_at: DateTime::from_naive_utc_and_offset(row.expires_at, Utc),
            author_name: row.author_name,
            author_avatar: row.author_avatar,
            active: row.active,
            background_color: row.background_color,
            media_type: StoryMediaType::parse(&row.media_type)
                .map_err(|_| AppError::Database(format!("Invalid media type: {}", row.media_type)))?,
            views: row.views,
        })
    }

    async fn fetch<'e, E>(executor: E, id: i64) -> Result<Option<Story>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, StoryRow>(
            r#"
            SELECT id, media_content, caption, created_at, expires_at, author_name,
                   author_avatar, active, background_color, media_type, views
            FROM stories
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.map(Self::row_to_story).transpose()
    }
}

#[async_trait]
impl StoryRepository for SqliteStoryRepository {
    async fn create(&self, story: NewStory) -> Result<Story> {
        let result = sqlx::query(
            r#"
            INSERT INTO stories (
                media_content, caption, created_at, expires_at, author_name,
                author_avatar, active, background_color, media_type, views
            ) VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?, 0)
            "#
        )
        .bind(&story.media_content)
        .bind(&story.caption)
        .bind(story.created_at.naive_utc())
        .bind(story.expires_at.naive_utc())
        .bind(&story.author_name)
        .bind(&story.author_avatar)
        .bind(&story.background_color)
        .bind(story.media_type.as_str())
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid()).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created story".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Story>> {
        Self::fetch(&self.pool, id).await
    }

    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Story>> {
        let rows = sqlx::query_as::<_, StoryRow>(
            r#"
            SELECT id, media_content, caption, created_at, expires_at, author_name,
                   author_avatar, active, background_color, media_type, views
            FROM stories
            WHERE active = 1 AND expires_at > ?
            ORDER BY created_at DESC, id DESC
            "#
        )
        .bind(now.naive_utc())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_story)
            .collect()
    }

    async fn list_active_by_author(&self, author_name: &str, now: DateTime<Utc>) -> Result<Vec<Story>> {
        let rows = sqlx::query_as::<_, StoryRow>(
            r#"
            SELECT id, media_content, caption, created_at, expires_at, author_name,
                   author_avatar, active, background_color, media_type, views
            FROM stories
            WHERE author_name = ? AND active = 1 AND expires_at > ?
            ORDER BY created_at DESC, id DESC
            "#
        )
        .bind(author_name)
        .bind(now.naive_utc())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_story)
            .collect()
    }

    async fn list_expiring_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Story>> {
        let rows = sqlx::query_as::<_, StoryRow>(
            r#"
            SELECT id, media_content, caption, created_at, expires_at, author_name,
                   author_avatar, active, background_color, media_type, views
            FROM stories
            WHERE active = 1 AND expires_at BETWEEN ? AND ?
            ORDER BY expires_at ASC, id ASC
            "#
        )
        .bind(start.naive_utc())
        .bind(end.naive_utc())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_story)
            .collect()
    }

    async fn record_view(&self, id: i64, now: DateTime<Utc>) -> Result<Option<StoryView>> {
        let mut tx = self.pool.begin().await?;

        let story = match Self::fetch(&mut *tx, id).await? {
            Some(s) => s,
            None => return Ok(None),
        };

        if !story.is_active_at(now) {
            sqlx::query("UPDATE stories SET active = 0 WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            return Ok(Some(StoryView::Expired));
        }

        sqlx::query("UPDATE stories SET views = views + 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let viewed = Self::fetch(&mut *tx, id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve viewed story".to_string())
        })?;

        tx.commit().await?;

        Ok(Some(StoryView::Viewed(viewed)))
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("UPDATE stories SET active = 0 WHERE active = 1 AND expires_at < ?")
            .bind(now.naive_utc())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
