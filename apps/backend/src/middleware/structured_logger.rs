use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::cookies::TOKEN_COOKIE;
use crate::trace_ctx;

/// Emits one `request_completed` event per request. Must sit inside
/// `RequestTrace` so the trace id is in scope.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// What gets logged once the response status is known. Only the presence of
/// the session cookie is recorded, never its value.
struct Completion {
    method: String,
    path: String,
    has_session: bool,
    started: Instant,
}

impl Completion {
    fn emit(&self, status: StatusCode) {
        let status_code = status.as_u16();
        let duration_us = u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX);
        let trace_id = trace_ctx::trace_id();
        let (method, path, has_session) = (&self.method, &self.path, self.has_session);

        match Severity::of(status) {
            Severity::Fault => error!(http.method = %method, url.path = %path, http.status_code = status_code, has_session, duration_us, trace_id = %trace_id, "request_completed"),
            Severity::Rejected => warn!(http.method = %method, url.path = %path, http.status_code = status_code, has_session, duration_us, trace_id = %trace_id, "request_completed"),
            Severity::Ok => info!(http.method = %method, url.path = %path, http.status_code = status_code, has_session, duration_us, trace_id = %trace_id, "request_completed"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Severity {
    Ok,
    Rejected,
    Fault,
}

impl Severity {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Severity::Fault
        } else if status.is_client_error() {
            Severity::Rejected
        } else {
            Severity::Ok
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let completion = Completion {
            method: req.method().to_string(),
            path: req.path().to_string(),
            has_session: req.cookie(TOKEN_COOKIE).is_some(),
            started: Instant::now(),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            completion.emit(status);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_status_class() {
        assert_eq!(Severity::of(StatusCode::OK), Severity::Ok);
        assert_eq!(Severity::of(StatusCode::NO_CONTENT), Severity::Ok);
        assert_eq!(Severity::of(StatusCode::UNAUTHORIZED), Severity::Rejected);
        assert_eq!(Severity::of(StatusCode::CONFLICT), Severity::Rejected);
        assert_eq!(Severity::of(StatusCode::INTERNAL_SERVER_ERROR), Severity::Fault);
    }
}
