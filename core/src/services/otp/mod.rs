//! One-time code service module
//!
//! This module provides the phone-bound code workflow:
//! - Lazy per-identity secret creation
//! - Time-step code computation and validation
//! - Minimum send interval between two codes
//! - Per-identity serialisation of issuance

mod clock;
mod code_engine;
mod config;
mod locks;
mod rate_limit;
mod service;
mod traits;
mod types;


pub use clock::{Clock, ManualClock, SystemClock};
pub use code_engine::CodeEngine;
pub use config::{OtpServiceConfig, SendWindowPolicy, DEFAULT_DISPATCH_TIMEOUT};
pub use locks::{IdentityGuard, IdentityLocks};
pub use rate_limit::{RateLimiter, SendDecision};
pub use service::OtpService;
pub use traits::Notifier;
pub use types::IssuedCode;
