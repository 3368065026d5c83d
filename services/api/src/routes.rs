use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use registry_taxonomy::taxonomy::{taxonomy_router, NotificationSink, TaxonomyService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_taxonomy_routes<N>(service: Arc<TaxonomyService<N>>) -> axum::Router
where
    N: NotificationSink + 'static,
{
    taxonomy_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/taxonomy/notifications",
            axum::routing::get(notifications_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Most recent confirmations and failures, oldest first.
pub(crate) async fn notifications_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    Json(state.notifications.recent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{build_taxonomy, RecentNotifications};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use registry_taxonomy::config::TaxonomyConfig;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let notifications = Arc::new(RecentNotifications::default());
        let taxonomy = build_taxonomy(&TaxonomyConfig {
            seed_defaults: true,
        });
        let service = Arc::new(TaxonomyService::new(taxonomy, notifications.clone()));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            notifications,
        };
        with_taxonomy_routes(service).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reflects_startup_state() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn mutations_show_up_in_the_notification_feed() {
        let app = app(true);

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/v1/taxonomy/dimensions/categories/2/toggle")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::get("/api/v1/taxonomy/notifications")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        let body = body_json(response).await;
        assert_eq!(body[0]["message"], "Dental deactivated");
        assert_eq!(body[0]["kind"], "success");
    }
}
