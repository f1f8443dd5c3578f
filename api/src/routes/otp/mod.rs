//! One-time code route handlers
//!
//! - `POST /send`: check the send window and dispatch a code
//! - `POST /verify`: check a submitted code

pub mod send;
pub mod verify;

use std::sync::Arc;

use otp_core::repositories::SecretStore;
use otp_core::services::{Notifier, OtpService};

pub use send::send;
pub use verify::verify;

/// Application state that holds shared services
pub struct AppState<S, N>
where
    S: SecretStore + ?Sized,
    N: Notifier + ?Sized,
{
    pub otp_service: Arc<OtpService<S, N>>,
}

impl<S, N> AppState<S, N>
where
    S: SecretStore + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(otp_service: Arc<OtpService<S, N>>) -> Self {
        Self { otp_service }
    }
}
