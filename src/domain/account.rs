//! Account records shared by patient and doctor registration.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Discriminator between the two registration collections.
///
/// Email uniqueness is scoped per kind: the same address may hold one patient
/// account and one doctor account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Patient,
    Doctor,
}

impl AccountKind {
    pub const ALL: [AccountKind; 2] = [AccountKind::Patient, AccountKind::Doctor];

    /// Backing table for this kind of account.
    pub fn table_name(&self) -> &'static str {
        match self {
            AccountKind::Patient => "patients",
            AccountKind::Doctor => "doctors",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Patient => "patient",
            AccountKind::Doctor => "doctor",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub kind: AccountKind,
    pub email: String,
    /// PHC-formatted password hash, never the plaintext.
    pub password_hash: String,
    /// Session token slot. Registration always leaves it empty.
    pub session_key: Option<String>,
}

impl Account {
    /// Builds a freshly registered account (no session yet).
    pub fn new(kind: AccountKind, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            kind,
            email: email.into(),
            password_hash: password_hash.into(),
            session_key: None,
        }
    }
}

/// Outcome of a registration attempt that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationResult {
    Created,
    AlreadyExists,
}

impl RegistrationResult {
    /// Status string returned to HTTP callers.
    pub fn status(&self) -> &'static str {
        match self {
            RegistrationResult::Created => "done",
            RegistrationResult::AlreadyExists => "exist",
        }
    }
}

/// Credentials validated for registration.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Rejects empty input. Values are kept exactly as given; no format or
    /// strength rules are applied.
    pub fn parse(email: &str, password: &str) -> Result<Self, String> {
        if email.is_empty() {
            return Err("email must not be empty".to_string());
        }
        if password.is_empty() {
            return Err("password must not be empty".to_string());
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}
