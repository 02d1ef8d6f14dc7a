use crate::config::Timeouts;
use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Create the application router.
///
/// No routes are registered, so every request falls through to the default
/// 404 fallback. The timeout and trace layers still run for each request.
#[allow(deprecated)]
pub fn create_router(timeouts: &Timeouts) -> Router {
    Router::new()
        .layer(TimeoutLayer::new(timeouts.request_deadline()))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::Service;

    #[tokio::test]
    async fn test_empty_router_returns_not_found() {
        let mut app = create_router(&Timeouts::default());

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.call(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_paths_all_fall_through() {
        let mut app = create_router(&Timeouts::default());

        for uri in ["/health", "/status", "/some/nested/path"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.call(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {}", uri);
        }
    }
}
