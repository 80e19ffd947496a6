//! Per-request access log
//!
//! Logs status, method, path, query, client ip, user agent and latency for
//! every request. Bodies are included for POST, PUT and DELETE, with subjects
//! masked and codes hidden. The level follows the status: error for 5xx, warn
//! for 4xx, debug otherwise.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

use actix_web::{
    body::{to_bytes, BoxBody, MessageBody},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, PayloadError},
    http::{Method, StatusCode},
    web::{Bytes, BytesMut},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use futures_util::{stream, StreamExt};
use serde_json::Value;

use hub_shared::subject::mask_subject;

/// Request bodies beyond this size are passed through without being logged
pub const MAX_LOGGED_BODY: usize = 64 * 1024;

const SUBJECT_FIELDS: &[&str] = &["phone", "email", "subject"];
const SECRET_FIELDS: &[&str] = &["code", "captcha_answer", "captcha_image"];

/// Access log middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AccessLogMiddleware<S> {
    service: Rc<S>,
}

fn logs_bodies(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::DELETE)
}

fn redact(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if SECRET_FIELDS.contains(&key.as_str()) {
                    *field = Value::String("******".to_string());
                } else if SUBJECT_FIELDS.contains(&key.as_str()) {
                    if let Value::String(subject) = field {
                        *subject = mask_subject(subject);
                    }
                } else {
                    redact(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}

/// Body as it should appear in the log
pub fn body_text(bytes: &[u8]) -> String {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(mut value) => {
            redact(&mut value);
            value.to_string()
        }
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn oversized() -> String {
    format!("[body over {} bytes, not logged]", MAX_LOGGED_BODY)
}

/// Read up to [`MAX_LOGGED_BODY`] bytes, then hand the whole body back to `req`
async fn capture_request_body(req: &mut ServiceRequest) -> Result<String, Error> {
    let mut payload = req.take_payload();
    let mut buffer = BytesMut::new();
    let mut truncated = false;

    while let Some(chunk) = payload.next().await {
        buffer.extend_from_slice(&chunk?);
        if buffer.len() > MAX_LOGGED_BODY {
            truncated = true;
            break;
        }
    }

    let bytes = buffer.freeze();
    let head = bytes.clone();
    if truncated {
        let rest = stream::once(async move { Ok::<Bytes, PayloadError>(head) }).chain(payload);
        req.set_payload(Payload::Stream {
            payload: Box::pin(rest),
        });
        Ok(oversized())
    } else {
        let replay = stream::once(async move { Ok::<Bytes, PayloadError>(head) });
        req.set_payload(Payload::Stream {
            payload: Box::pin(replay),
        });
        Ok(body_text(&bytes))
    }
}

struct AccessEntry {
    method: Method,
    path: String,
    query: String,
    ip: String,
    user_agent: String,
    request_body: String,
    start: Instant,
}

impl AccessEntry {
    fn log(&self, status: StatusCode, response_body: &str) {
        let latency_ms = self.start.elapsed().as_millis() as u64;

        macro_rules! access {
            ($level:ident) => {
                tracing::$level!(
                    status = status.as_u16(),
                    method = %self.method,
                    path = %self.path,
                    query = %self.query,
                    ip = %self.ip,
                    user_agent = %self.user_agent,
                    request_body = %self.request_body,
                    response_body = %response_body,
                    latency_ms = latency_ms,
                    "HTTP Access Log"
                )
            };
        }

        if status.is_server_error() {
            access!(error);
        } else if status.is_client_error() {
            access!(warn);
        } else {
            access!(debug);
        }
    }
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let start = Instant::now();
            let method = req.method().clone();
            let with_bodies = logs_bodies(&method);
            let path = req.path().to_string();
            let query = req.query_string().to_string();
            let ip = req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("-")
                .to_string();
            let user_agent = req
                .headers()
                .get("User-Agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            let request_body = if with_bodies {
                capture_request_body(&mut req).await?
            } else {
                String::new()
            };

            let entry = AccessEntry {
                method,
                path,
                query,
                ip,
                user_agent,
                request_body,
                start,
            };

            let res = match service.call(req).await {
                Ok(res) => res,
                Err(err) => {
                    entry.log(err.as_response_error().status_code(), &err.to_string());
                    return Err(err);
                }
            };
            let status = res.status();

            if !with_bodies {
                entry.log(status, "");
                return Ok(res.map_into_boxed_body());
            }

            let (http_req, http_res) = res.into_parts();
            let (http_res, body) = http_res.into_parts();
            let bytes = to_bytes(body).await.map_err(|e| {
                let err: Box<dyn std::error::Error> = e.into();
                ErrorInternalServerError(err.to_string())
            })?;
            let response_body = if bytes.len() > MAX_LOGGED_BODY {
                oversized()
            } else {
                body_text(&bytes)
            };
            entry.log(status, &response_body);
            let http_res = http_res.set_body(BoxBody::new(bytes));
            Ok(ServiceResponse::new(http_req, http_res))
        })
    }
}
