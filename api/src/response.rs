//! JSON response helpers shared by every handler
//!
//! Each `abort*` helper takes an optional message and falls back to a
//! default when `None` is given.

use std::collections::BTreeMap;
use std::fmt::Display;

use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

use hub_core::DomainError;

pub const SUCCESS_MESSAGE: &str = "操作成功！";
pub const NOT_FOUND_MESSAGE: &str = "数据不存在，请确认请求正确";
pub const FORBIDDEN_MESSAGE: &str = "权限不足，请确认是否有对应权限";
pub const INTERNAL_ERROR_MESSAGE: &str = "服务内部错误，请稍后再试";
pub const BAD_REQUEST_MESSAGE: &str =
    "请求解析错误，请确认请求格式是否正确。上传文件使用multipart头，参数使用json格式";
pub const UNPROCESSABLE_MESSAGE: &str = "请求处理失败，请查看error信息";
pub const VALIDATION_MESSAGE: &str = "请求验证不通过，具体查看errors";
pub const UNAUTHORIZED_MESSAGE: &str = "请求解析错误，请确认请求格式是否正确。";

/// Field name to the list of messages for that field
pub type FieldErrors = BTreeMap<String, Vec<String>>;

fn message_or(message: Option<&str>, default: &str) -> String {
    message.unwrap_or(default).to_string()
}

/// 200 with the data as the whole body
pub fn json<T: Serialize>(data: &T) -> HttpResponse {
    HttpResponse::Ok().json(data)
}

/// 200 `{ "success": true, "message": ... }`
pub fn success() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": SUCCESS_MESSAGE,
    }))
}

/// 200 `{ "success": true, "data": ... }`
pub fn data<T: Serialize>(data: &T) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": data,
    }))
}

/// 201 `{ "success": true, "data": ... }`
pub fn created<T: Serialize>(data: &T) -> HttpResponse {
    HttpResponse::Created().json(json!({
        "success": true,
        "data": data,
    }))
}

/// 201 with the data as the whole body
pub fn created_json<T: Serialize>(data: &T) -> HttpResponse {
    HttpResponse::Created().json(data)
}

pub fn abort404(message: Option<&str>) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "message": message_or(message, NOT_FOUND_MESSAGE),
    }))
}

pub fn abort403(message: Option<&str>) -> HttpResponse {
    HttpResponse::Forbidden().json(json!({
        "message": message_or(message, FORBIDDEN_MESSAGE),
    }))
}

pub fn abort500(message: Option<&str>) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "message": message_or(message, INTERNAL_ERROR_MESSAGE),
    }))
}

/// 400 for bodies that could not be parsed
pub fn bad_request(error: &dyn Display, message: Option<&str>) -> HttpResponse {
    tracing::debug!(error = %error, "Request body rejected");
    HttpResponse::BadRequest().json(json!({
        "message": message_or(message, BAD_REQUEST_MESSAGE),
        "error": error.to_string(),
    }))
}

/// 404 when the error is a missing record, 422 otherwise
pub fn error(err: &DomainError, message: Option<&str>) -> HttpResponse {
    if err.is_not_found() {
        return abort404(None);
    }

    HttpResponse::UnprocessableEntity().json(json!({
        "message": message_or(message, UNPROCESSABLE_MESSAGE),
        "error": err.to_string(),
    }))
}

/// 422 `{ "message": ..., "errors": { field: [messages] } }`
pub fn validation_error(errors: &FieldErrors) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(json!({
        "message": VALIDATION_MESSAGE,
        "errors": errors,
    }))
}

pub fn unauthorized(message: Option<&str>) -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "message": message_or(message, UNAUTHORIZED_MESSAGE),
    }))
}

/// Map a service failure onto the response family
///
/// Backend failures are hidden behind a 500; the details only reach the log.
pub fn domain_error(err: &DomainError) -> HttpResponse {
    match err {
        DomainError::Store { .. } | DomainError::Database { .. } | DomainError::Internal { .. } => {
            tracing::error!(error = %err, "Request failed on a backend");
            abort500(None)
        }
        _ => error(err, None),
    }
}
