mod customer;
mod oauth;
mod order;
mod session;
mod sms;

pub use self::customer::{
    CustomerRepositoryTrait, CustomerServiceTrait, DynCustomerRepository, DynCustomerService,
};
pub use self::oauth::{DynOAuthService, OAuthServiceTrait};
pub use self::order::{DynOrderRepository, DynOrderService, OrderRepositoryTrait, OrderServiceTrait};
pub use self::session::{DynSessionService, SessionServiceTrait};
pub use self::sms::{DynSmsService, SmsServiceTrait};
