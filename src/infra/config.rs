//! Centralized configuration (environment variables + defaults).

use crate::crypto::password::PasswordHasher;
use crate::error::StoreError;
use anyhow::Context;
use std::str::FromStr;

/// Which [`AccountStore`](crate::storage::AccountStore) backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow::anyhow!(
                "unknown STORE_BACKEND '{}' (expected 'postgres' or 'memory')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Required for the Postgres backend, checked when connecting.
    pub database_url: Option<String>,
    pub port: u16,
    pub cors_origin: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub store_backend: StoreBackend,
    pub password_hash_memory_kib: u32,
    pub password_hash_iterations: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            port: 5000,
            cors_origin: "http://localhost:3000".to_string(),
            db_max_connections: 5,
            db_acquire_timeout_secs: 5,
            store_backend: StoreBackend::Postgres,
            password_hash_memory_kib: argon2::Params::DEFAULT_M_COST,
            password_hash_iterations: argon2::Params::DEFAULT_T_COST,
        }
    }
}

impl Config {
    /// Loads `.env` (falling back to `db.env`) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        if dotenv::dotenv().is_err() {
            dotenv::from_filename("db.env").ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, applying defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            port: parse_or(&non_empty, "PORT", defaults.port)?,
            cors_origin: non_empty("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            db_max_connections: parse_or(&non_empty, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?
                .max(1),
            db_acquire_timeout_secs: parse_or(
                &non_empty,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.db_acquire_timeout_secs,
            )?,
            store_backend: parse_or(&non_empty, "STORE_BACKEND", defaults.store_backend)?,
            password_hash_memory_kib: parse_or(
                &non_empty,
                "PASSWORD_HASH_MEMORY_KIB",
                defaults.password_hash_memory_kib,
            )?,
            password_hash_iterations: parse_or(
                &non_empty,
                "PASSWORD_HASH_ITERATIONS",
                defaults.password_hash_iterations,
            )?,
        })
    }

    /// Database URL must be provided (no default) for safety.
    pub fn database_url(&self) -> Result<&str, StoreError> {
        self.database_url
            .as_deref()
            .ok_or(StoreError::MissingDatabaseUrl)
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn password_hasher(&self) -> anyhow::Result<PasswordHasher> {
        PasswordHasher::new(self.password_hash_memory_kib, self.password_hash_iterations)
            .context("invalid PASSWORD_HASH_* settings")
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}
