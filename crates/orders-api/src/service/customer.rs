use crate::{
    abstract_trait::{CustomerServiceTrait, DynCustomerRepository},
    domain::{
        requests::{CreateCustomerRequest, FindAllCustomers, UpdateCustomerRequest},
        response::{
            ApiResponse, ApiResponsePagination, CustomerResponse, MessageResponse, Pagination,
        },
        session::SessionUser,
    },
    service::normalize_paging,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, TracingContext},
};
use tracing::{error, info, warn};

const TRACER: &str = "customer-service";

#[derive(Clone)]
pub struct CustomerService {
    repository: DynCustomerRepository,
    metrics: Metrics,
}

impl CustomerService {
    pub fn new(repository: DynCustomerRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register("customer_service", registry);

        Self {
            repository,
            metrics,
        }
    }

    fn not_found() -> ServiceError {
        ServiceError::NotFound("Customer not found".to_string())
    }
}

#[async_trait]
impl CustomerServiceTrait for CustomerService {
    async fn find_all(
        &self,
        req: &FindAllCustomers,
    ) -> Result<ApiResponsePagination<Vec<CustomerResponse>>, ServiceError> {
        let (page, page_size) = normalize_paging(req.page, req.page_size);
        let req = FindAllCustomers {
            page,
            page_size,
            search: req.search.clone(),
        };

        let tracing_ctx = TracingContext::start(
            TRACER,
            "find_all_customers",
            vec![
                KeyValue::new("page", page.to_string()),
                KeyValue::new("page_size", page_size.to_string()),
                KeyValue::new("search", req.search.clone()),
            ],
        );

        let (customers, total) = match self.repository.find_all(&req).await {
            Ok(res) => res,
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Get,
                    &format!("Failed to list customers: {e}"),
                );
                return Err(ServiceError::Repo(e));
            }
        };

        tracing_ctx.success(
            &self.metrics,
            Method::Get,
            &format!("Found {} customers", customers.len()),
        );

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Customers retrieved successfully".to_string(),
            data: customers.into_iter().map(CustomerResponse::from).collect(),
            pagination: Pagination::new(page, page_size, total),
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "find_customer_by_id",
            vec![KeyValue::new("customer.id", id.to_string())],
        );

        match self.repository.find_by_id(id).await {
            Ok(Some(customer)) => {
                tracing_ctx.success(&self.metrics, Method::Get, "Customer found");
                Ok(ApiResponse::success(
                    "Customer retrieved successfully",
                    CustomerResponse::from(customer),
                ))
            }
            Ok(None) => {
                tracing_ctx.error(&self.metrics, Method::Get, "Customer not found");
                Err(Self::not_found())
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Get,
                    &format!("Failed to fetch customer: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn create_customer(
        &self,
        req: &CreateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        info!("🏗️ Creating customer {}", req.email);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "create_customer",
            vec![KeyValue::new("customer.email", req.email.clone())],
        );

        match self.repository.create(req).await {
            Ok(customer) => {
                tracing_ctx.success(&self.metrics, Method::Post, "Customer created");
                Ok(ApiResponse::success(
                    "Customer created successfully",
                    CustomerResponse::from(customer),
                ))
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Post,
                    &format!("Failed to create customer: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn update_customer(
        &self,
        req: &UpdateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "update_customer",
            vec![KeyValue::new("customer.id", req.id.to_string())],
        );

        match self.repository.update(req).await {
            Ok(Some(customer)) => {
                tracing_ctx.success(&self.metrics, Method::Put, "Customer updated");
                Ok(ApiResponse::success(
                    "Customer updated successfully",
                    CustomerResponse::from(customer),
                ))
            }
            Ok(None) => {
                tracing_ctx.error(&self.metrics, Method::Put, "Customer not found");
                Err(Self::not_found())
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Put,
                    &format!("Failed to update customer: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_customer(&self, id: i32) -> Result<MessageResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "delete_customer",
            vec![KeyValue::new("customer.id", id.to_string())],
        );

        match self.repository.delete(id).await {
            Ok(true) => {
                tracing_ctx.success(&self.metrics, Method::Delete, "Customer deleted");
                Ok(MessageResponse::success("Customer deleted"))
            }
            Ok(false) => {
                tracing_ctx.error(&self.metrics, Method::Delete, "Customer not found");
                Err(Self::not_found())
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Delete,
                    &format!("Failed to delete customer: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn sync_profile(&self, profile: &SessionUser) -> Result<CustomerResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "sync_customer_profile",
            vec![KeyValue::new("customer.email", profile.email.clone())],
        );

        match self.repository.find_by_email(&profile.email).await {
            Ok(Some(existing)) => {
                tracing_ctx.success(&self.metrics, Method::Get, "Customer profile found");
                return Ok(CustomerResponse::from(existing));
            }
            Ok(None) => {}
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Get,
                    &format!("Failed to look up customer profile: {e}"),
                );
                return Err(ServiceError::Repo(e));
            }
        }

        info!("👤 First login for {}, creating customer", profile.email);

        let req = CreateCustomerRequest {
            name: profile.name.clone(),
            email: profile.email.clone(),
            contact: profile.contact.clone().unwrap_or_default(),
        };

        let created = match self.repository.create(&req).await {
            Ok(customer) => Ok(CustomerResponse::from(customer)),
            // A concurrent first request for the same email won the insert.
            Err(RepositoryError::AlreadyExists(_)) => {
                warn!("Customer {} created concurrently, reloading", profile.email);
                self.repository
                    .find_by_email(&profile.email)
                    .await
                    .map_err(ServiceError::Repo)
                    .and_then(|found| {
                        found
                            .map(CustomerResponse::from)
                            .ok_or_else(Self::not_found)
                    })
            }
            Err(e) => {
                error!("❌ Failed to create customer for {}: {e}", profile.email);
                Err(ServiceError::Repo(e))
            }
        };

        match &created {
            Ok(_) => tracing_ctx.success(&self.metrics, Method::Post, "Customer profile created"),
            Err(e) => tracing_ctx.error(
                &self.metrics,
                Method::Post,
                &format!("Failed to create customer profile: {e}"),
            ),
        }

        created
    }
}
