use crate::{
    abstract_trait::{
        DynCustomerRepository, DynOAuthService, DynOrderRepository, DynSessionService,
        DynSmsService,
    },
    config::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::{CustomerRepository, OrderRepository},
    service::{AfricasTalkingSms, GoogleOAuthService, LogOnlySms, SessionSigner},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    /// Marks auth cookies `Secure` when the app is served over https.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let customer_repository =
            Arc::new(CustomerRepository::new(pool.clone())) as DynCustomerRepository;
        let order_repository = Arc::new(OrderRepository::new(pool)) as DynOrderRepository;

        let sms: DynSmsService = match &config.sms {
            Some(sms_config) => {
                info!("📨 SMS confirmations via {}", sms_config.base_url);
                Arc::new(
                    AfricasTalkingSms::new(sms_config.clone())
                        .context("Failed to build SMS client")?,
                )
            }
            None => {
                info!("📵 SMS gateway not configured, confirmations are logged only");
                Arc::new(LogOnlySms)
            }
        };

        let oauth = Arc::new(
            GoogleOAuthService::new(config.google.clone())
                .context("Failed to build Google OAuth client")?,
        ) as DynOAuthService;

        let sessions = Arc::new(SessionSigner::new(&config.secret_key)) as DynSessionService;

        Ok(Self::from_deps(
            DependenciesInjectDeps {
                customer_repository,
                order_repository,
                sms,
                oauth,
                sessions,
            },
            config.base_url.starts_with("https://"),
        ))
    }

    pub fn from_deps(deps: DependenciesInjectDeps, secure_cookies: bool) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(deps, &mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
            secure_cookies,
        }
    }
}
