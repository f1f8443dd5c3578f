use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendRequest {
    /// Phone number in E.164 format, e.g. "+79991234567"
    #[validate(length(min = 3, max = 16))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    /// Phone number the code was sent to
    #[validate(length(min = 1, max = 16))]
    pub phone: String,

    /// Code as received by the user
    #[validate(length(min = 1, max = 16))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub message: String,
    pub resend_after: u64, // seconds until can resend
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub message: String,
}
