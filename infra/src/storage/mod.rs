//! Secret store backends
//!
//! Only an in-process backend exists; state does not survive a restart and is
//! not shared between processes.

pub mod memory;

pub use memory::InMemorySecretStore;
