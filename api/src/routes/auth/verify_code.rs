//! Captcha and verification code endpoints

use actix_web::{web, HttpResponse};

use hub_shared::subject::mask_subject;

use crate::dto::auth::{CheckCodeRequest, CheckCodeResponse, SendPhoneCodeRequest};
use crate::response::{self, FieldErrors};
use crate::state::AppState;
use crate::validation::validate;

pub const CAPTCHA_MISMATCH_MESSAGE: &str = "图片验证码答案错误";
pub const SMS_FAILED_MESSAGE: &str = "failed to send SMS";

/// POST /api/v1/auth/verify-codes/captcha
///
/// Answers `{ "captcha_id": ..., "captcha_image": "data:image/png;base64,..." }`.
pub async fn show_captcha(state: web::Data<AppState>) -> HttpResponse {
    match state.captchas.generate().await {
        Ok(issued) => response::json(&issued),
        Err(err) => response::domain_error(&err),
    }
}

/// POST /api/v1/auth/verify-codes/phone
///
/// ```json
/// { "phone": "13812345678", "captcha_id": "...", "captcha_answer": "123456" }
/// ```
///
/// The captcha must match before an SMS is sent.
pub async fn send_using_phone(
    state: web::Data<AppState>,
    request: web::Json<SendPhoneCodeRequest>,
) -> HttpResponse {
    if let Err(resp) = validate(&request.0) {
        return resp;
    }

    match state
        .captchas
        .verify(&request.captcha_id, &request.captcha_answer)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            let mut errors = FieldErrors::new();
            errors.insert(
                "captcha_answer".to_string(),
                vec![CAPTCHA_MISMATCH_MESSAGE.to_string()],
            );
            return response::validation_error(&errors);
        }
        Err(err) => return response::domain_error(&err),
    }

    match state.verify_codes.send_sms(&request.phone).await {
        Ok(true) => response::success(),
        Ok(false) => {
            tracing::warn!(
                phone = %mask_subject(&request.phone),
                "Verification code issued but delivery failed"
            );
            response::abort500(Some(SMS_FAILED_MESSAGE))
        }
        Err(err) => response::domain_error(&err),
    }
}

/// POST /api/v1/auth/verify-codes/check
///
/// Answers `{ "matched": bool }`. A matched code stays valid until it expires.
pub async fn check_code(
    state: web::Data<AppState>,
    request: web::Json<CheckCodeRequest>,
) -> HttpResponse {
    if let Err(resp) = validate(&request.0) {
        return resp;
    }

    match state
        .verify_codes
        .check_answer(&request.subject, &request.code)
        .await
    {
        Ok(matched) => response::json(&CheckCodeResponse { matched }),
        Err(err) => response::domain_error(&err),
    }
}
