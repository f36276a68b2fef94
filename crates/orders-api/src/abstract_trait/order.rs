use crate::{
    domain::{
        requests::{CreateOrderRequest, FindAllOrders, UpdateOrderRequest},
        response::{
            ApiResponse, ApiResponsePagination, CustomerResponse, MessageResponse, OrderResponse,
        },
    },
    model::Order,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;

pub type DynOrderRepository = Arc<dyn OrderRepositoryTrait + Send + Sync>;
pub type DynOrderService = Arc<dyn OrderServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderRepositoryTrait {
    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError>;
    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Order>, RepositoryError>;
    async fn create(&self, req: &CreateOrderRequest) -> Result<Order, RepositoryError>;
    async fn update(&self, req: &UpdateOrderRequest) -> Result<Option<Order>, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait OrderServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn find_by_customer(&self, customer_id: i32)
    -> Result<Vec<OrderResponse>, ServiceError>;
    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_order(
        &self,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn delete_order(&self, id: i32) -> Result<MessageResponse, ServiceError>;
    /// Creates the order and texts a confirmation to the customer's contact. A failed
    /// SMS is logged and does not fail the order.
    async fn place_order(
        &self,
        customer: &CustomerResponse,
        item: &str,
        amount: Decimal,
    ) -> Result<OrderResponse, ServiceError>;
}
