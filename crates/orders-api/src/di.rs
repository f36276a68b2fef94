use crate::{
    abstract_trait::{
        DynCustomerRepository, DynCustomerService, DynOAuthService, DynOrderRepository,
        DynOrderService, DynSessionService, DynSmsService,
    },
    service::{CustomerService, OrderService, OrderServiceDeps},
};
use prometheus_client::registry::Registry;
use std::sync::Arc;

/// Adapters the services are built on. Production wires Postgres, Google and the SMS
/// gateway; tests pass in-memory doubles.
pub struct DependenciesInjectDeps {
    pub customer_repository: DynCustomerRepository,
    pub order_repository: DynOrderRepository,
    pub sms: DynSmsService,
    pub oauth: DynOAuthService,
    pub sessions: DynSessionService,
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub customer_service: DynCustomerService,
    pub order_service: DynOrderService,
    pub oauth_service: DynOAuthService,
    pub session_service: DynSessionService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("customer_service", &"DynCustomerService")
            .field("order_service", &"DynOrderService")
            .field("oauth_service", &"DynOAuthService")
            .field("session_service", &"DynSessionService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            customer_repository,
            order_repository,
            sms,
            oauth,
            sessions,
        } = deps;

        let customer_service: DynCustomerService = Arc::new(CustomerService::new(
            customer_repository.clone(),
            registry,
        ));

        let order_service: DynOrderService = Arc::new(OrderService::new(
            OrderServiceDeps {
                orders: order_repository,
                customers: customer_repository,
                sms,
            },
            registry,
        ));

        Self {
            customer_service,
            order_service,
            oauth_service: oauth,
            session_service: sessions,
        }
    }
}
