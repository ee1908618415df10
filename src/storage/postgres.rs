//! Persistent account store implementation using PostgreSQL.

use crate::domain::{Account, AccountKind};
use crate::error::StoreError;
use crate::infra::config::Config;
use crate::storage::store::{AccountStore, InsertOutcome};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;

/// An account store that uses a PostgreSQL connection pool.
///
/// Each kind lives in its own table with a `UNIQUE` constraint on `email`;
/// inserts go through `ON CONFLICT DO NOTHING`, so the uniqueness check and
/// the write are one statement.
#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    /// Connects using `config` and creates the account tables if missing.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let database_url = config.database_url()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
            .connect(database_url)
            .await
            .map_err(StoreError::Connect)?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Wraps an existing pool. The schema is not touched.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `patients` and `doctors` tables (idempotent).
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for kind in AccountKind::ALL {
            let sql = format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id BIGSERIAL PRIMARY KEY,
                    email TEXT NOT NULL UNIQUE,
                    password TEXT NOT NULL,
                    session_key TEXT,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
                )",
                kind.table_name()
            );
            sqlx::query(&sql)
                .execute(&self.pool)
                .await
                .map_err(StoreError::Schema)?;
        }
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn find_by_email(
        &self,
        kind: AccountKind,
        email: &str,
    ) -> Result<Option<Account>, StoreError> {
        let sql = format!(
            "SELECT email, password, session_key FROM {} WHERE email = $1",
            kind.table_name()
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(Account {
            kind,
            email: row.try_get("email")?,
            password_hash: row.try_get("password")?,
            session_key: row.try_get("session_key")?,
        }))
    }

    async fn insert(&self, account: &Account) -> Result<InsertOutcome, StoreError> {
        let sql = format!(
            "INSERT INTO {} (email, password, session_key) VALUES ($1, $2, $3)
             ON CONFLICT (email) DO NOTHING",
            account.kind.table_name()
        );
        let result = sqlx::query(&sql)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.session_key)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(InsertOutcome::Duplicate),
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(StoreError::Query(e)),
        }
    }

    async fn count(&self, kind: AccountKind) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table_name());
        let n: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
