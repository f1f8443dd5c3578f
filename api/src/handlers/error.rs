//! Translation of service errors into HTTP responses

use actix_web::{http::header, HttpResponse};
use validator::ValidationErrors;

use otp_core::errors::OtpError;
use otp_shared::errors::{error_codes, ErrorResponse};

/// Map an OTP service error to its HTTP response
///
/// Internal failures are logged in full and reported to the client with a
/// generic message.
pub fn otp_error_response(error: &OtpError) -> HttpResponse {
    match error {
        OtpError::RateLimited { .. } => {
            let retry_after = error.retry_after_secs().unwrap_or(0);
            HttpResponse::TooManyRequests()
                .insert_header((header::RETRY_AFTER, retry_after.to_string()))
                .json(
                    ErrorResponse::new(error_codes::RATE_LIMITED, error.to_string())
                        .add_detail("retry_after_seconds", retry_after),
                )
        }
        OtpError::Unverified => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::INVALID_CODE,
            "Invalid verification code",
        )),
        OtpError::DispatchFailed { message } => {
            tracing::error!(error = %message, "Code dispatch failed");
            HttpResponse::BadGateway().json(ErrorResponse::new(
                error_codes::DISPATCH_FAILED,
                "Failed to deliver verification code",
            ))
        }
        OtpError::SecretDerivationFailed { .. }
        | OtpError::Storage { .. }
        | OtpError::CodeComputation { .. }
        | OtpError::InvalidParameters { .. } => {
            tracing::error!(error = %error, "OTP service failure");
            internal_error_response()
        }
    }
}

/// 400 response listing the offending fields
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();

    tracing::warn!(fields = ?fields, "Request validation failed");

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("fields", fields),
    )
}

/// 400 response with a single message
pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message))
}

pub fn internal_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};

    async fn body_of(resp: HttpResponse) -> ErrorResponse {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_internal_failures_map_to_500() {
        let failures = [
            OtpError::SecretDerivationFailed {
                message: "OS random source unavailable".to_string(),
            },
            OtpError::Storage {
                message: "connection reset".to_string(),
            },
            OtpError::CodeComputation {
                message: "secret too short".to_string(),
            },
        ];

        for failure in failures {
            let resp = otp_error_response(&failure);
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{:?}", failure);

            let body = body_of(resp).await;
            assert_eq!(body.error, error_codes::INTERNAL_ERROR);
            assert_eq!(body.message, "An internal error occurred");
        }
    }

    #[actix_web::test]
    async fn test_rate_limit_carries_retry_after() {
        let resp = otp_error_response(&OtpError::RateLimited {
            wait: std::time::Duration::from_millis(12_500),
        });
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap(), "13");
    }
}
