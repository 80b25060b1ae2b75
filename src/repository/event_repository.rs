use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};

use crate::{
    domain::{Event, EventRequest},
    error::{AppError, Result},
    repository::EventRepository,
};

#[derive(FromRow)]
struct EventRow {
    id: i64,
    name: String,
    category: Option<String>,
    start_date_time: Option<NaiveDateTime>,
    end_date_time: Option<NaiveDateTime>,
    location: Option<String>,
    description: Option<String>,
    contact_number: Option<String>,
    email: Option<String>,
    is_approved: bool,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            name: row.name,
            category: row.category,
            start_date_time: row.start_date_time.map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            end_date_time: row.end_date_time.map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            location: row.location,
            description: row.description,
            contact_number: row.contact_number,
            email: row.email,
            is_approved: row.is_approved,
        }
    }
}

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: EventRequest) -> Result<Event> {
        // New events always wait for approval.
        let result = sqlx::query(
            r#"
            INSERT INTO events (
                name, category, start_date_time, end_date_time, location,
                description, contact_number, email, is_approved
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0)
            "#
        )
        .bind(&event.name)
        .bind(&event.category)
        .bind(event.start_date_time.map(|dt| dt.naive_utc()))
        .bind(event.end_date_time.map(|dt| dt.naive_utc()))
        .bind(&event.location)
        .bind(&event.description)
        .bind(&event.contact_number)
        .bind(&event.email)
        .execute(&self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid()).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created event".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, category, start_date_time, end_date_time, location,
                   description, contact_number, email, is_approved
            FROM events
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Event::from))
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, category, start_date_time, end_date_time, location,
                   description, contact_number, email, is_approved
            FROM events
            ORDER BY id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn list_approved(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, category, start_date_time, end_date_time, location,
                   description, contact_number, email, is_approved
            FROM events
            WHERE is_approved = 1
            ORDER BY id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, category, start_date_time, end_date_time, location,
                   description, contact_number, email, is_approved
            FROM events
            WHERE category = ?
            ORDER BY id ASC
            "#
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn update(&self, id: i64, event: EventRequest, approval: Option<bool>) -> Result<Option<Event>> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET name = ?, category = ?, start_date_time = ?, end_date_time = ?,
                location = ?, description = ?, contact_number = ?, email = ?,
                is_approved = COALESCE(?, is_approved)
            WHERE id = ?
            "#
        )
        .bind(&event.name)
        .bind(&event.category)
        .bind(event.start_date_time.map(|dt| dt.naive_utc()))
        .bind(event.end_date_time.map(|dt| dt.naive_utc()))
        .bind(&event.location)
        .bind(&event.description)
        .bind(&event.contact_number)
        .bind(&event.email)
        .bind(approval)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn approve(&self, id: i64) -> Result<Option<Event>> {
        let result = sqlx::query("UPDATE events SET is_approved = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
