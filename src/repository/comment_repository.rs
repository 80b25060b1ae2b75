use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};

use crate::{
    domain::{Comment, CreateCommentRequest},
    error::{AppError, Result},
    repository::CommentRepository,
};

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    announcement_id: i64,
    author: String,
    text: String,
    timestamp: NaiveDateTime,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            announcement_id: row.announcement_id,
            author: row.author,
            text: row.text,
            timestamp: DateTime::from_naive_utc_and_offset(row.timestamp, Utc),
        }
    }
}

pub struct SqliteCommentRepository {
    pool: SqlitePool,
}

impl SqliteCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            "SELECT id, announcement_id, author, text, timestamp FROM comments WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Comment::from))
    }
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    async fn create(
        &self,
        announcement_id: i64,
        request: CreateCommentRequest,
        timestamp: DateTime<Utc>,
    ) -> Result<Comment> {
        let result = sqlx::query(
            r#"
            INSERT INTO comments (announcement_id, author, text, timestamp)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(announcement_id)
        .bind(&request.author)
        .bind(&request.text)
        .bind(timestamp.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // The announcement was deleted after the caller checked for it.
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(format!("Announcement not found with id: {}", announcement_id))
            }
            e => e.into(),
        })?;

        self.find_by_id(result.last_insert_rowid()).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created comment".to_string())
        })
    }

    async fn find_by_announcement(&self, announcement_id: i64) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, announcement_id, author, text, timestamp
            FROM comments
            WHERE announcement_id = ?
            ORDER BY timestamp ASC, id ASC
            "#
        )
        .bind(announcement_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
