//! Panic recovery
//!
//! A panic inside a handler is logged with the request line and turned into
//! an error whose response is the 500 JSON body, instead of dropping the
//! connection. The request is never cloned here: the router needs sole
//! ownership of it to record path parameters.

use std::any::Any;
use std::future::{ready, Ready};
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use actix_web::{
    body::MessageBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error,
};
use futures_util::future::{FutureExt, LocalBoxFuture};

use crate::response;

/// Recovery middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct Recovery;

impl<S, B> Transform<S, ServiceRequest> for Recovery
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RecoveryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RecoveryMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RecoveryMiddleware<S> {
    service: Rc<S>,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown panic payload")
    }
}

impl<S, B> Service<ServiceRequest> for RecoveryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();
        let service = self.service.clone();

        Box::pin(async move {
            let outcome = match std::panic::catch_unwind(AssertUnwindSafe(|| service.call(req))) {
                Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await,
                Err(payload) => Err(payload),
            };

            match outcome {
                Ok(result) => result,
                Err(payload) => {
                    tracing::error!(
                        method = %method,
                        path = %path,
                        panic = %panic_message(payload.as_ref()),
                        "Recovered from panic"
                    );
                    Err(InternalError::from_response("handler panicked", response::abort500(None)).into())
                }
            }
        })
    }
}
