//! Account registration service.
//!
//! Flow for one call:
//! 1.  Look the email up under the requested kind; if present, report
//!     `AlreadyExists` without hashing or writing.
//! 2.  Hash the password off the async workers (Argon2 is deliberately slow).
//! 3.  Insert-if-absent. A duplicate at this point means a concurrent call won
//!     the race, which is also reported as `AlreadyExists`.

use crate::crypto::password::PasswordHasher;
use crate::domain::{Account, AccountKind, Credentials, RegistrationResult};
use crate::error::RegistrationError;
use crate::storage::{AccountStore, InsertOutcome};
use std::sync::Arc;

/// Stateless registration front for an [`AccountStore`]. Cheap to clone.
#[derive(Clone)]
pub struct Registrar {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
}

impl Registrar {
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Registers `email` under `kind` unless an account already holds it.
    pub async fn register(
        &self,
        kind: AccountKind,
        email: &str,
        password: &str,
    ) -> Result<RegistrationResult, RegistrationError> {
        let creds = Credentials::parse(email, password).map_err(RegistrationError::Validation)?;

        if self.store.find_by_email(kind, &creds.email).await?.is_some() {
            tracing::info!(%kind, "registration skipped: account exists");
            return Ok(RegistrationResult::AlreadyExists);
        }

        let password_hash = self.hash_password(creds.password).await?;
        let account = Account::new(kind, creds.email, password_hash);

        match self.store.insert(&account).await? {
            InsertOutcome::Inserted => {
                tracing::info!(%kind, "account registered");
                Ok(RegistrationResult::Created)
            }
            InsertOutcome::Duplicate => {
                tracing::info!(%kind, "registration lost race: account exists");
                Ok(RegistrationResult::AlreadyExists)
            }
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, RegistrationError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| RegistrationError::Hashing(e.to_string()))?
            .map_err(|e| RegistrationError::Hashing(e.to_string()))
    }
}
