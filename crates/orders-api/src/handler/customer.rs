use crate::{
    abstract_trait::DynCustomerService,
    domain::{
        requests::{CreateCustomerRequest, FindAllCustomers, UpdateCustomerRequest},
        response::{ApiResponse, ApiResponsePagination, CustomerResponse, MessageResponse},
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
    path = "/api/v1/customers",
    tag = "Customer",
    params(FindAllCustomers),
    responses(
        (status = 200, description = "List of customers", body = ApiResponsePagination<Vec<CustomerResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_customers(
    Extension(service): Extension<DynCustomerService>,
    Query(params): Query<FindAllCustomers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customer",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = ApiResponse<CustomerResponse>),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
pub async fn get_customer(
    Extension(service): Extension<DynCustomerService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customer",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<CustomerResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_customer(
    Extension(service): Extension<DynCustomerService>,
    ValidatedPayload(body): ValidatedPayload<CreateCustomerRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_customer(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    tag = "Customer",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<CustomerResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
pub async fn update_customer(
    Extension(service): Extension<DynCustomerService>,
    Path(id): Path<i32>,
    ValidatedPayload(mut body): ValidatedPayload<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = id;
    let response = service.update_customer(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    tag = "Customer",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer and their orders deleted", body = MessageResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
pub async fn delete_customer(
    Extension(service): Extension<DynCustomerService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_customer(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn customer_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/v1/customers", get(get_customers).post(create_customer))
        .route(
            "/api/v1/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .layer(Extension(app_state.di_container.customer_service.clone()))
}
