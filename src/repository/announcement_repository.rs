use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};

use crate::{
    domain::{Announcement, AnnouncementMediaType, AnnouncementRequest, NewAnnouncement},
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

#[derive(FromRow)]
struct AnnouncementRow {
    id: i64,
    content: String,
    start_date: NaiveDateTime,
    image: Option<String>,
    author_name: String,
    author_avatar: Option<String>,
    likes: i64,
    background_color: Option<String>,
    media_type: String,
}

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: AnnouncementRow) -> Result<Announcement> {
        Ok(Announcement {
            id: row.id,
            content: row.content,
            start_date: DateTime::from_naive_utc_and_offset(row.start_date, Utc),
            image: row.image,
            author_name: row.author_name,
            author_avatar: row.author_avatar,
            likes: row.likes,
            background_color: row.background_color,
            media_type: AnnouncementMediaType::parse(&row.media_type)
                .map_err(|_| AppError::Database(format!("Invalid media type: {}", row.media_type)))?,
        })
    }

    async fn fetch<'e, E>(executor: E, id: i64) -> Result<Option<Announcement>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, content, start_date, image, author_name, author_avatar,
                   likes, background_color, media_type
            FROM announcements
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.map(Self::row_to_announcement).transpose()
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let result = sqlx::query(
            r#"
            INSERT INTO announcements (
                content, start_date, image, author_name, author_avatar,
                likes, background_color, media_type
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&announcement.content)
        .bind(announcement.start_date.naive_utc())
        .bind(&announcement.image)
        .bind(&announcement.author_name)
        .bind(&announcement.author_avatar)
        .bind(announcement.likes)
        .bind(&announcement.background_color)
        .bind(announcement.media_type.as_str())
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid()).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created announcement".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>> {
        Self::fetch(&self.pool, id).await
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM announcements WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn list(&self) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, content, start_date, image, author_name, author_avatar,
                   likes, background_color, media_type
            FROM announcements
            ORDER BY start_date DESC, id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Self::row_to_announcement)
            .collect()
    }

    async fn update(&self, id: i64, request: AnnouncementRequest) -> Result<Option<Announcement>> {
        let mut tx = self.pool.begin().await?;

        let mut announcement = match Self::fetch(&mut *tx, id).await? {
            Some(a) => a,
            None => return Ok(None),
        };
        announcement.apply(request)?;

        sqlx::query(
            r#"
            UPDATE announcements
            SET content = ?, start_date = ?, image = ?, author_name = ?,
                author_avatar = ?, likes = ?, background_color = ?, media_type = ?
            WHERE id = ?
            "#
        )
        .bind(&announcement.content)
        .bind(announcement.start_date.naive_utc())
        .bind(&announcement.image)
        .bind(&announcement.author_name)
        .bind(&announcement.author_avatar)
        .bind(announcement.likes)
        .bind(&announcement.background_color)
        .bind(announcement.media_type.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(announcement))
    }

    async fn increment_likes(&self, id: i64) -> Result<Option<Announcement>> {
        let result = sqlx::query("UPDATE announcements SET likes = likes + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
