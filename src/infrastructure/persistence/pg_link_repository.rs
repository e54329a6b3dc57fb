//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Row shape shared by all link queries.
///
/// `code` is nullable in the schema (provisional rows), but every row handed
/// to callers has a code; a NULL here after assignment indicates a bug and is
/// surfaced as an internal error rather than a panic.
#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: Option<String>,
    target_url: String,
    click_count: i64,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl LinkRow {
    fn into_link(self) -> Result<Link, AppError> {
        let code = self.code.ok_or_else(|| {
            AppError::internal("Link row has no code assigned", json!({ "id": self.id }))
        })?;

        Ok(Link::new(
            self.id,
            code,
            self.target_url,
            self.click_count,
            self.created_at,
            self.expires_at,
        ))
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection. Uniqueness of
/// codes is enforced by the `links_code_key` constraint; the resulting
/// violation is translated to [`AppError::Conflict`] by the error mapper.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, target_url, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, code, target_url, click_count, created_at, expires_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        // Provisional rows come back without a code; the caller assigns one
        // in the second phase, so return the row as-is with an empty code.
        match row.code {
            Some(_) => row.into_link(),
            None => Ok(Link::new(
                row.id,
                String::new(),
                row.target_url,
                row.click_count,
                row.created_at,
                row.expires_at,
            )),
        }
    }

    async fn assign_code(&self, id: i64, code: &str) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET code = $2
            WHERE id = $1
            RETURNING id, code, target_url, click_count, created_at, expires_at
            "#,
        )
        .bind(id)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => row.into_link(),
            None => Err(AppError::not_found(
                "Link not found for code assignment",
                json!({ "id": id }),
            )),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, target_url, click_count, created_at, expires_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(LinkRow::into_link).transpose()
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM links WHERE code = $1)"#)
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET click_count = click_count + 1
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
