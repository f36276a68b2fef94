mod auth;
mod customer;
mod order;
mod ui;

use crate::{middleware::session::session_middleware, state::AppState};
use anyhow::Result;
use axum::{
    Extension, Json, Router,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use serde_json::json;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::auth::{OAUTH_STATE_COOKIE, auth_routes};
pub use self::customer::customer_routes;
pub use self::order::order_routes;
pub use self::ui::ui_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,

        customer::get_customers,
        customer::get_customer,
        customer::create_customer,
        customer::update_customer,
        customer::delete_customer,

        order::get_orders,
        order::get_order,
        order::create_order,
        order::update_order,
        order::delete_order,
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Customer", description = "Customer endpoints"),
        (name = "Order", description = "Order endpoints"),
    )
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = serde_json::Value))
)]
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Orders API is running"
    }))
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .with_state(shared_state.clone())
            .merge(customer_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(auth_routes(shared_state.clone()))
            .merge(ui_routes(shared_state.clone()));

        let (app_router, api) = api_router
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .split_for_parts();

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .layer(middleware::from_fn(session_middleware))
            .layer(Extension(
                shared_state.di_container.session_service.clone(),
            ))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
