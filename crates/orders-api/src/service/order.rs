use crate::{
    abstract_trait::{DynCustomerRepository, DynOrderRepository, DynSmsService, OrderServiceTrait},
    domain::{
        requests::{CreateOrderRequest, FindAllOrders, UpdateOrderRequest},
        response::{
            ApiResponse, ApiResponsePagination, CustomerResponse, MessageResponse, OrderResponse,
            Pagination,
        },
    },
    model::Order,
    service::normalize_paging,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use tracing::{error, info, warn};

const TRACER: &str = "order-service";

pub fn confirmation_message(customer_name: &str, order: &OrderResponse) -> String {
    format!(
        "Hello {customer_name}, your order for {} (amount {}) has been received. Order #{}.",
        order.item, order.amount, order.id
    )
}

pub struct OrderServiceDeps {
    pub orders: DynOrderRepository,
    pub customers: DynCustomerRepository,
    pub sms: DynSmsService,
}

#[derive(Clone)]
pub struct OrderService {
    orders: DynOrderRepository,
    customers: DynCustomerRepository,
    sms: DynSmsService,
    metrics: Metrics,
}

impl OrderService {
    pub fn new(deps: OrderServiceDeps, registry: &mut Registry) -> Self {
        let OrderServiceDeps {
            orders,
            customers,
            sms,
        } = deps;

        let metrics = Metrics::new();
        metrics.register("order_service", registry);

        Self {
            orders,
            customers,
            sms,
            metrics,
        }
    }

    fn not_found() -> ServiceError {
        ServiceError::NotFound("Order not found".to_string())
    }

    async fn ensure_customer(&self, customer_id: i32) -> Result<(), ServiceError> {
        match self.customers.find_by_id(customer_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::Validation(vec![
                "Customer not found".to_string(),
            ])),
        }
    }

    async fn insert(
        &self,
        req: &CreateOrderRequest,
        tracing_ctx: &TracingContext,
    ) -> Result<Order, ServiceError> {
        if let Err(e) = self.ensure_customer(req.customer_id).await {
            tracing_ctx.error(&self.metrics, Method::Post, &e.to_string());
            return Err(e);
        }

        match self.orders.create(req).await {
            Ok(order) => {
                tracing_ctx.success(&self.metrics, Method::Post, "Order created");
                Ok(order)
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Post,
                    &format!("Failed to create order: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let (page, page_size) = normalize_paging(req.page, req.page_size);
        let req = FindAllOrders {
            page,
            page_size,
            customer_id: req.customer_id,
        };

        let tracing_ctx = TracingContext::start(
            TRACER,
            "find_all_orders",
            vec![
                KeyValue::new("page", page.to_string()),
                KeyValue::new("page_size", page_size.to_string()),
            ],
        );

        let (orders, total) = match self.orders.find_all(&req).await {
            Ok(res) => res,
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Get,
                    &format!("Failed to list orders: {e}"),
                );
                return Err(ServiceError::Repo(e));
            }
        };

        tracing_ctx.success(
            &self.metrics,
            Method::Get,
            &format!("Found {} orders", orders.len()),
        );

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Orders retrieved successfully".to_string(),
            data: orders.into_iter().map(OrderResponse::from).collect(),
            pagination: Pagination::new(page, page_size, total),
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "find_order_by_id",
            vec![KeyValue::new("order.id", id.to_string())],
        );

        match self.orders.find_by_id(id).await {
            Ok(Some(order)) => {
                tracing_ctx.success(&self.metrics, Method::Get, "Order found");
                Ok(ApiResponse::success(
                    "Order retrieved successfully",
                    OrderResponse::from(order),
                ))
            }
            Ok(None) => {
                tracing_ctx.error(&self.metrics, Method::Get, "Order not found");
                Err(Self::not_found())
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Get,
                    &format!("Failed to fetch order: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn find_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<OrderResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "find_orders_by_customer",
            vec![KeyValue::new("customer.id", customer_id.to_string())],
        );

        match self.orders.find_by_customer(customer_id).await {
            Ok(orders) => {
                tracing_ctx.success(
                    &self.metrics,
                    Method::Get,
                    &format!("Found {} orders", orders.len()),
                );
                Ok(orders.into_iter().map(OrderResponse::from).collect())
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Get,
                    &format!("Failed to list customer orders: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🏗️ Creating order for customer_id={}", req.customer_id);

        let tracing_ctx = TracingContext::start(
            TRACER,
            "create_order",
            vec![
                KeyValue::new("order.customer_id", req.customer_id.to_string()),
                KeyValue::new("order.item", req.item.clone()),
            ],
        );

        let order = self.insert(req, &tracing_ctx).await?;

        Ok(ApiResponse::success(
            "Order created successfully",
            OrderResponse::from(order),
        ))
    }

    async fn update_order(
        &self,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "update_order",
            vec![KeyValue::new("order.id", req.id.to_string())],
        );

        match self.orders.find_by_id(req.id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing_ctx.error(&self.metrics, Method::Put, "Order not found");
                return Err(Self::not_found());
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Put,
                    &format!("Failed to fetch order: {e}"),
                );
                return Err(ServiceError::Repo(e));
            }
        }

        if let Err(e) = self.ensure_customer(req.customer_id).await {
            tracing_ctx.error(&self.metrics, Method::Put, &e.to_string());
            return Err(e);
        }

        match self.orders.update(req).await {
            Ok(Some(order)) => {
                tracing_ctx.success(&self.metrics, Method::Put, "Order updated");
                Ok(ApiResponse::success(
                    "Order updated successfully",
                    OrderResponse::from(order),
                ))
            }
            Ok(None) => {
                tracing_ctx.error(&self.metrics, Method::Put, "Order not found");
                Err(Self::not_found())
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Put,
                    &format!("Failed to update order: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn delete_order(&self, id: i32) -> Result<MessageResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "delete_order",
            vec![KeyValue::new("order.id", id.to_string())],
        );

        match self.orders.delete(id).await {
            Ok(true) => {
                tracing_ctx.success(&self.metrics, Method::Delete, "Order deleted");
                Ok(MessageResponse::success("Order deleted"))
            }
            Ok(false) => {
                tracing_ctx.error(&self.metrics, Method::Delete, "Order not found");
                Err(Self::not_found())
            }
            Err(e) => {
                tracing_ctx.error(
                    &self.metrics,
                    Method::Delete,
                    &format!("Failed to delete order: {e}"),
                );
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn place_order(
        &self,
        customer: &CustomerResponse,
        item: &str,
        amount: Decimal,
    ) -> Result<OrderResponse, ServiceError> {
        let tracing_ctx = TracingContext::start(
            TRACER,
            "place_order",
            vec![
                KeyValue::new("order.customer_id", customer.id.to_string()),
                KeyValue::new("order.item", item.to_string()),
            ],
        );

        let req = CreateOrderRequest {
            customer_id: customer.id,
            item: item.to_string(),
            amount,
        };

        let order = OrderResponse::from(self.insert(&req, &tracing_ctx).await?);

        if customer.contact.trim().is_empty() {
            warn!(
                "📵 Customer {} has no contact, skipping SMS for order {}",
                customer.id, order.id
            );
            return Ok(order);
        }

        let message = confirmation_message(&customer.name, &order);
        match self.sms.send(&customer.contact, &message).await {
            Ok(()) => info!("📨 Confirmation SMS sent for order {}", order.id),
            Err(e) => error!(
                "❌ Failed to send confirmation SMS for order {}: {e}",
                order.id
            ),
        }

        Ok(order)
    }
}
