//! Repository interfaces for per-identity state.

pub mod secret;

pub use secret::SecretStore;

#[cfg(test)]
pub use secret::MockSecretStore;
