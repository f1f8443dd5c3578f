//! Domain entities representing core business objects.

pub mod secret;

pub use secret::{Secret, SECRET_BYTES};
