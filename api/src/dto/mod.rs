pub mod otp;

pub use otp::*;

// Re-export the shared error body
pub use otp_shared::errors::ErrorResponse;
