//! Persistence contract for registered accounts.

use crate::domain::{Account, AccountKind};
use crate::error::StoreError;
use async_trait::async_trait;

/// Result of an insert-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Another account with the same `(kind, email)` already exists. Nothing was written.
    Duplicate,
}

/// Store of accounts keyed by `(kind, email)`.
///
/// Implementations must enforce email uniqueness per kind themselves and make
/// `insert` a single conditional write: two racing inserts for the same key
/// yield exactly one `Inserted`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Looks up the account registered under `email` for `kind`.
    async fn find_by_email(
        &self,
        kind: AccountKind,
        email: &str,
    ) -> Result<Option<Account>, StoreError>;

    /// Persists `account` unless its key is already taken.
    async fn insert(&self, account: &Account) -> Result<InsertOutcome, StoreError>;

    /// Number of accounts stored for `kind`.
    async fn count(&self, kind: AccountKind) -> Result<u64, StoreError>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases underlying resources. Further calls may fail.
    async fn close(&self) {}
}
