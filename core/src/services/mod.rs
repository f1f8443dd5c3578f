//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    Clock, CodeEngine, IssuedCode, ManualClock, Notifier, OtpService, OtpServiceConfig,
    SendDecision, SendWindowPolicy, SystemClock,
};
