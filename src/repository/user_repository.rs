use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};

use crate::{
    domain::User,
    error::{AppError, Result},
    repository::{NewUser, UserChanges, UserRepository},
};

// Roles are folded into one comma separated column by GROUP_CONCAT.
#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    account_locked: bool,
    enabled: bool,
    created_at: NaiveDateTime,
    roles: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            account_locked: row.account_locked,
            enabled: row.enabled,
            roles: row
                .roles
                .split(',')
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect(),
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        }
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn role_id(&self, role: &str) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM roles WHERE name = ?")
            .bind(role)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role {} not found", role)))
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> Result<User> {
        let role_id = self.role_id(&user.role).await?;
        let now = Utc::now().naive_utc();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                name, email, password_hash, phone, account_locked, enabled, created_at
            ) VALUES (?, ?, ?, ?, 0, 1, ?)
            "#
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES (?, ?)")
            .bind(id)
            .bind(role_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created user".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.name, u.email, u.phone, u.account_locked, u.enabled, u.created_at,
                   COALESCE(GROUP_CONCAT(r.name), '') AS roles
            FROM users u
            LEFT JOIN user_roles ur ON ur.user_id = u.id
            LEFT JOIN roles r ON r.id = ur.role_id
            WHERE u.id = ?
            GROUP BY u.id
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.name, u.email, u.phone, u.account_locked, u.enabled, u.created_at,
                   COALESCE(GROUP_CONCAT(r.name), '') AS roles
            FROM users u
            LEFT JOIN user_roles ur ON ur.user_id = u.id
            LEFT JOIN roles r ON r.id = ur.role_id
            WHERE u.email = ?
            GROUP BY u.id
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_password_hash(&self, email: &str) -> Result<Option<String>> {
        let hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hash)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.name, u.email, u.phone, u.account_locked, u.enabled, u.created_at,
                   COALESCE(GROUP_CONCAT(r.name), '') AS roles
            FROM users u
            LEFT JOIN user_roles ur ON ur.user_id = u.id
            LEFT JOIN roles r ON r.id = ur.role_id
            GROUP BY u.id
            ORDER BY u.id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE(?, name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                password_hash = COALESCE(?, password_hash)
            WHERE id = ?
            "#
        )
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn add_role(&self, id: i64, role: &str) -> Result<()> {
        let role_id = self.role_id(role).await?;

        sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role_id) VALUES (?, ?)")
            .bind(id)
            .bind(role_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
