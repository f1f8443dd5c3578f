use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;

use otp_core::repositories::SecretStore;
use otp_core::services::Notifier;
use otp_shared::phone::{is_valid_e164, mask_phone_number};

use crate::dto::{SendRequest, SendResponse};
use crate::handlers::{bad_request, internal_error_response, otp_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /send
///
/// Sends a code to the phone number unless one was sent within the
/// configured interval.
///
/// # Request Body
///
/// ```json
/// { "phone": "+79991234567" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Code sent", "resend_after": 30 }
/// ```
///
/// ## Errors
/// - 400 `VALIDATION_ERROR`: malformed body or phone not in E.164 format
/// - 429 `RATE_LIMITED`: `details.retry_after_seconds` says when to retry
/// - 502 `DISPATCH_FAILED`: the delivery provider rejected the message
/// - 500 `INTERNAL_ERROR`
pub async fn send<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<SendRequest>,
) -> HttpResponse
where
    S: SecretStore + ?Sized + 'static,
    N: Notifier + ?Sized + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }
    if !is_valid_e164(&request.phone) {
        tracing::warn!(phone = %mask_phone_number(&request.phone), "Rejected non-E.164 phone");
        return bad_request("Phone number must be in E.164 format, e.g. +79991234567");
    }

    tracing::info!(phone = %mask_phone_number(&request.phone), "Processing send request");

    // Run on its own task so a dropped connection cannot cancel a dispatch
    // halfway through.
    let service = Arc::clone(&state.otp_service);
    let phone = request.phone;
    let outcome = tokio::spawn(async move { service.send_code(&phone).await }).await;

    match outcome {
        Ok(Ok(issued)) => {
            let resend_after = (issued.next_send_at - issued.issued_at)
                .num_seconds()
                .max(0) as u64;
            HttpResponse::Ok().json(SendResponse {
                message: "Code sent".to_string(),
                resend_after,
            })
        }
        Ok(Err(e)) => otp_error_response(&e),
        Err(join_error) => {
            tracing::error!(error = %join_error, "Send task failed");
            internal_error_response()
        }
    }
}
