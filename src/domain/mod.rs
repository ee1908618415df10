//! Domain types for account registration.

pub mod account;

pub use account::{Account, AccountKind, Credentials, RegistrationResult};
