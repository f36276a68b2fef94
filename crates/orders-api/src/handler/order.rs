use crate::{
    abstract_trait::DynOrderService,
    domain::{
        requests::{CreateOrderRequest, FindAllOrders, UpdateOrderRequest},
        response::{ApiResponse, ApiResponsePagination, OrderResponse, MessageResponse},
    },
    middleware::validate::ValidatedPayload,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "Order",
    params(FindAllOrders),
    responses(
        (status = 200, description = "List of orders", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderService>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "Order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation error or unknown customer", body = ErrorResponse)
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderService>,
    ValidatedPayload(body): ValidatedPayload<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_order(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn update_order(
    Extension(service): Extension<DynOrderService>,
    Path(id): Path<i32>,
    ValidatedPayload(mut body): ValidatedPayload<UpdateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = id;
    let response = service.update_order(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn delete_order(
    Extension(service): Extension<DynOrderService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_order(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/v1/orders", get(get_orders).post(create_order))
        .route(
            "/api/v1/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .layer(Extension(app_state.di_container.order_service.clone()))
}
