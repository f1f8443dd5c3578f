pub mod error;

pub use error::{bad_request, internal_error_response, otp_error_response, validation_error_response};
