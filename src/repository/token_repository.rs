use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};

use crate::{
    domain::Token,
    error::Result,
    repository::TokenRepository,
};

#[derive(FromRow)]
struct TokenRow {
    id: i64,
    token: String,
    user_id: i64,
    created_at: NaiveDateTime,
}

impl From<TokenRow> for Token {
    fn from(row: TokenRow) -> Self {
        Token {
            id: row.id,
            token: row.token,
            user_id: row.user_id,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        }
    }
}

/// Keeps a record of every issued bearer token. Nothing reads it back as a
/// revocation list.
pub struct SqliteTokenRepository {
    pool: SqlitePool,
}

impl SqliteTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    async fn save(&self, user_id: i64, token: &str, created_at: DateTime<Utc>) -> Result<Token> {
        let result = sqlx::query("INSERT INTO tokens (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user_id)
            .bind(created_at.naive_utc())
            .execute(&self.pool)
            .await?;

        Ok(Token {
            id: result.last_insert_rowid(),
            token: token.to_string(),
            user_id,
            created_at,
        })
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Token>> {
        let rows = sqlx::query_as::<_, TokenRow>(
            "SELECT id, token, user_id, created_at FROM tokens WHERE user_id = ? ORDER BY id ASC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Token::from).collect())
    }
}
