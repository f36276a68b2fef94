#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use chrono::Utc;
use orders_api::{
    abstract_trait::{
        CustomerRepositoryTrait, DynCustomerRepository, DynOAuthService, DynOrderRepository,
        DynSessionService, DynSmsService, OAuthServiceTrait, OrderRepositoryTrait,
        SessionServiceTrait, SmsServiceTrait,
    },
    di::DependenciesInjectDeps,
    domain::{
        requests::{
            CreateCustomerRequest, CreateOrderRequest, FindAllCustomers, FindAllOrders,
            UpdateCustomerRequest, UpdateOrderRequest,
        },
        session::SessionUser,
    },
    handler::AppRouter,
    model::{Customer, Order},
    service::SessionSigner,
    state::AppState,
};
use serde_json::Value;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

#[derive(Default)]
struct Tables {
    customers: Vec<Customer>,
    orders: Vec<Order>,
    next_customer_id: i32,
    next_order_id: i32,
}

/// Both tables behind one lock, so deleting a customer cascades to their orders.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn customers(&self) -> Vec<Customer> {
        self.tables.lock().unwrap().customers.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.tables.lock().unwrap().orders.clone()
    }

    pub fn insert_customer(&self, name: &str, email: &str, contact: &str) -> Customer {
        let mut tables = self.tables.lock().unwrap();
        tables.next_customer_id += 1;
        let customer = Customer {
            id: tables.next_customer_id,
            name: name.to_string(),
            email: email.to_string(),
            contact: contact.to_string(),
        };
        tables.customers.push(customer.clone());
        customer
    }
}

fn paginate<T: Clone>(rows: &[T], page: i32, page_size: i32) -> Vec<T> {
    let offset = (i64::from(page) - 1).max(0) * i64::from(page_size);
    rows.iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(page_size as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl CustomerRepositoryTrait for InMemoryStore {
    async fn find_all(
        &self,
        req: &FindAllCustomers,
    ) -> Result<(Vec<Customer>, i64), RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let needle = req.search.trim().to_lowercase();
        let mut matching: Vec<Customer> = tables
            .customers
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        matching.sort_by_key(|c| c.id);

        let total = matching.len() as i64;
        Ok((paginate(&matching, req.page, req.page_size), total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .customers
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, req: &CreateCustomerRequest) -> Result<Customer, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.customers.iter().any(|c| c.email == req.email) {
            return Err(RepositoryError::AlreadyExists(
                "customers_email_key".to_string(),
            ));
        }

        tables.next_customer_id += 1;
        let customer = Customer {
            id: tables.next_customer_id,
            name: req.name.clone(),
            email: req.email.clone(),
            contact: req.contact.clone(),
        };
        tables.customers.push(customer.clone());
        Ok(customer)
    }

    async fn update(
        &self,
        req: &UpdateCustomerRequest,
    ) -> Result<Option<Customer>, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .customers
            .iter()
            .any(|c| c.id != req.id && c.email == req.email)
        {
            return Err(RepositoryError::AlreadyExists(
                "customers_email_key".to_string(),
            ));
        }

        let Some(customer) = tables.customers.iter_mut().find(|c| c.id == req.id) else {
            return Ok(None);
        };
        customer.name = req.name.clone();
        customer.email = req.email.clone();
        customer.contact = req.contact.clone();
        Ok(Some(customer.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.customers.len();
        tables.customers.retain(|c| c.id != id);
        let deleted = tables.customers.len() != before;
        if deleted {
            tables.orders.retain(|o| o.customer_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl OrderRepositoryTrait for InMemoryStore {
    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let mut matching: Vec<Order> = tables
            .orders
            .iter()
            .filter(|o| req.customer_id.is_none_or(|id| o.customer_id == id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        Ok((paginate(&matching, req.page, req.page_size), total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Order>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let mut orders: Vec<Order> = tables
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn create(&self, req: &CreateOrderRequest) -> Result<Order, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.customers.iter().any(|c| c.id == req.customer_id) {
            return Err(RepositoryError::ForeignKey(
                "orders_customer_id_fkey".to_string(),
            ));
        }

        tables.next_order_id += 1;
        let now = Utc::now().naive_utc();
        let order = Order {
            id: tables.next_order_id,
            customer_id: req.customer_id,
            item: req.item.clone(),
            amount: req.amount,
            created_at: now,
            updated_at: now,
        };
        tables.orders.push(order.clone());
        Ok(order)
    }

    async fn update(&self, req: &UpdateOrderRequest) -> Result<Option<Order>, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.customers.iter().any(|c| c.id == req.customer_id) {
            return Err(RepositoryError::ForeignKey(
                "orders_customer_id_fkey".to_string(),
            ));
        }

        let Some(order) = tables.orders.iter_mut().find(|o| o.id == req.id) else {
            return Ok(None);
        };
        order.customer_id = req.customer_id;
        order.item = req.item.clone();
        order.amount = req.amount;
        order.updated_at = Utc::now().naive_utc();
        Ok(Some(order.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.orders.len();
        tables.orders.retain(|o| o.id != id);
        Ok(tables.orders.len() != before)
    }
}

/// Captures every message instead of talking to a gateway.
#[derive(Default)]
pub struct RecordingSms {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingSms {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsServiceTrait for RecordingSms {
    async fn send(&self, to: &str, message: &str) -> Result<(), ServiceError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), message.to_string()));
        if self.fail {
            return Err(ServiceError::Upstream("gateway down".to_string()));
        }
        Ok(())
    }
}

/// Accepts the code `valid-code` and returns [`ada`] for it.
pub struct FakeOAuth;

#[async_trait]
impl OAuthServiceTrait for FakeOAuth {
    fn authorization_url(&self, state: &str) -> Result<String, ServiceError> {
        Ok(format!(
            "https://accounts.example.com/auth?response_type=code&state={state}"
        ))
    }

    async fn fetch_profile(&self, code: &str) -> Result<SessionUser, ServiceError> {
        match code {
            "valid-code" => Ok(ada()),
            _ => Err(ServiceError::Upstream("invalid_grant".to_string())),
        }
    }
}

pub fn ada() -> SessionUser {
    SessionUser {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        contact: Some("+254700000001".to_string()),
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub sms: Arc<RecordingSms>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_sms(RecordingSms::default())
    }

    pub fn with_sms(sms: RecordingSms) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let sms = Arc::new(sms);

        let state = AppState::from_deps(
            DependenciesInjectDeps {
                customer_repository: store.clone() as DynCustomerRepository,
                order_repository: store.clone() as DynOrderRepository,
                sms: sms.clone() as DynSmsService,
                oauth: Arc::new(FakeOAuth) as DynOAuthService,
                sessions: Arc::new(SessionSigner::new(SECRET)) as DynSessionService,
            },
            false,
        );

        Self {
            router: AppRouter::build(state),
            store,
            sms,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

pub fn session_cookie(user: &SessionUser) -> String {
    let token = SessionSigner::new(SECRET).issue(user).unwrap();
    format!("session={token}")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
