//! Signup existence checks

use actix_web::{web, HttpResponse};

use hub_shared::subject::mask_subject;

use crate::dto::auth::{EmailExistRequest, ExistResponse, PhoneExistRequest};
use crate::response;
use crate::state::AppState;
use crate::validation::validate;

/// POST /api/v1/auth/signup/phone/exist
///
/// ```json
/// { "phone": "13812345678" }
/// ```
///
/// Answers `{ "exist": bool }`.
pub async fn is_phone_exist(
    state: web::Data<AppState>,
    request: web::Json<PhoneExistRequest>,
) -> HttpResponse {
    if let Err(resp) = validate(&request.0) {
        return resp;
    }

    match state.users.is_phone_exist(&request.phone).await {
        Ok(exist) => {
            tracing::debug!(phone = %mask_subject(&request.phone), exist, "Phone lookup");
            response::json(&ExistResponse { exist })
        }
        Err(err) => response::domain_error(&err),
    }
}

/// POST /api/v1/auth/signup/email/exist
pub async fn is_email_exist(
    state: web::Data<AppState>,
    request: web::Json<EmailExistRequest>,
) -> HttpResponse {
    if let Err(resp) = validate(&request.0) {
        return resp;
    }

    match state.users.is_email_exist(&request.email).await {
        Ok(exist) => {
            tracing::debug!(email = %mask_subject(&request.email), exist, "Email lookup");
            response::json(&ExistResponse { exist })
        }
        Err(err) => response::domain_error(&err),
    }
}
