use actix_web::{web, HttpResponse};
use validator::Validate;

use otp_core::errors::OtpError;
use otp_core::repositories::SecretStore;
use otp_core::services::Notifier;

use crate::dto::{VerifyRequest, VerifyResponse};
use crate::handlers::{otp_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /verify
///
/// # Request Body
///
/// ```json
/// { "phone": "+79991234567", "code": "123456" }
/// ```
///
/// Returns 200 with `{"valid": true}` for a valid code and 401
/// `INVALID_CODE` otherwise. A phone that never requested a code is
/// indistinguishable from a wrong code.
pub async fn verify<S, N>(
    state: web::Data<AppState<S, N>>,
    request: web::Json<VerifyRequest>,
) -> HttpResponse
where
    S: SecretStore + ?Sized + 'static,
    N: Notifier + ?Sized + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    if state
        .otp_service
        .verify_code(&request.phone, &request.code)
        .await
    {
        HttpResponse::Ok().json(VerifyResponse {
            valid: true,
            message: "Code is valid".to_string(),
        })
    } else {
        otp_error_response(&OtpError::Unverified)
    }
}
