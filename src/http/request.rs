//! Request ID middleware.
//!
//! # Responsibilities
//! - Stamp every inbound request with a unique `x-request-id`
//! - Preserve an ID supplied by the client
//!
//! # Design Decisions
//! - The ID is added as early as possible so every log line can carry it
//! - UUID v4; no coordination needed across instances

use std::task::{Context, Poll};

use axum::http::{HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer inserting a UUID v4 `x-request-id` into requests that lack one.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Clone, Debug)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if !req.headers().contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut().insert(X_REQUEST_ID, value);
            }
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use std::convert::Infallible;
    use tower::ServiceExt;

    #[tokio::test]
    async fn adds_request_id_when_absent() {
        let service = RequestIdLayer.layer(tower::service_fn(|req: Request<Body>| async move {
            Ok::<_, Infallible>(req.headers().get(X_REQUEST_ID).cloned())
        }));

        let seen = service
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let value = seen.expect("request id should be inserted");
        assert!(Uuid::parse_str(value.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn preserves_client_supplied_id() {
        let service = RequestIdLayer.layer(tower::service_fn(|req: Request<Body>| async move {
            Ok::<_, Infallible>(req.headers().get(X_REQUEST_ID).cloned())
        }));

        let request = Request::builder()
            .uri("/")
            .header(X_REQUEST_ID, "client-id")
            .body(Body::empty())
            .unwrap();

        let seen = service.oneshot(request).await.unwrap();
        assert_eq!(seen.unwrap(), "client-id");
    }
}
