use crate::{
    domain::{
        requests::{CreateCustomerRequest, FindAllCustomers, UpdateCustomerRequest},
        response::{ApiResponse, ApiResponsePagination, CustomerResponse, MessageResponse},
        session::SessionUser,
    },
    model::Customer,
};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;

pub type DynCustomerRepository = Arc<dyn CustomerRepositoryTrait + Send + Sync>;
pub type DynCustomerService = Arc<dyn CustomerServiceTrait + Send + Sync>;

#[async_trait]
pub trait CustomerRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllCustomers,
    ) -> Result<(Vec<Customer>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError>;
    async fn create(&self, req: &CreateCustomerRequest) -> Result<Customer, RepositoryError>;
    /// `None` when no customer has `req.id`.
    async fn update(&self, req: &UpdateCustomerRequest)
    -> Result<Option<Customer>, RepositoryError>;
    /// `false` when no customer has `id`.
    async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait CustomerServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllCustomers,
    ) -> Result<ApiResponsePagination<Vec<CustomerResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn create_customer(
        &self,
        req: &CreateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn update_customer(
        &self,
        req: &UpdateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn delete_customer(&self, id: i32) -> Result<MessageResponse, ServiceError>;
    /// Returns the customer owning the profile's email, creating it on first login.
    async fn sync_profile(&self, profile: &SessionUser) -> Result<CustomerResponse, ServiceError>;
}
