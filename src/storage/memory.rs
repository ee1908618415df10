//! In-process account store.

use crate::domain::{Account, AccountKind};
use crate::error::StoreError;
use crate::storage::store::{AccountStore, InsertOutcome};
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Account store backed by a map guarded by a single lock.
///
/// Holding the write lock across the presence check and the insert makes
/// `insert` atomic per key.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<(AccountKind, String), Account>>,
    closed: AtomicBool,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable("store is closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_email(
        &self,
        kind: AccountKind,
        email: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.ensure_open()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&(kind, email.to_string())).cloned())
    }

    async fn insert(&self, account: &Account) -> Result<InsertOutcome, StoreError> {
        self.ensure_open()?;
        let mut accounts = self.accounts.write().await;
        match accounts.entry((account.kind, account.email.clone())) {
            Entry::Occupied(_) => Ok(InsertOutcome::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn count(&self, kind: AccountKind) -> Result<u64, StoreError> {
        self.ensure_open()?;
        let accounts = self.accounts.read().await;
        Ok(accounts.keys().filter(|(k, _)| *k == kind).count() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
