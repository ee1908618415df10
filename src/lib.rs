pub mod app;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::Registrar;
pub use crypto::password::PasswordHasher;
pub use domain::{Account, AccountKind, RegistrationResult};
pub use error::{RegistrationError, StoreError};
pub use infra::Config;
pub use storage::{AccountStore, InMemoryAccountStore, PostgresAccountStore};
