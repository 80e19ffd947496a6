//! Request body parsing and validation glue

use actix_web::error::InternalError;
use actix_web::web;
use actix_web::HttpResponse;
use validator::{Validate, ValidationErrors};

use crate::response::{self, FieldErrors};

/// JSON extractor config answering malformed bodies with a 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let resp = response::bad_request(&err, None);
        InternalError::from_response(err, resp).into()
    })
}

/// Flatten validator output into `field -> [messages]`
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, list)| {
            let messages = list
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Run the request's rules, producing the 422 response on failure
pub fn validate<T: Validate>(request: &T) -> Result<(), HttpResponse> {
    request.validate().map_err(|errors| {
        let errors = field_errors(&errors);
        tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Request validation failed");
        response::validation_error(&errors)
    })
}
