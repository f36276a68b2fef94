mod customer;
mod form;
mod order;

pub use self::customer::{CreateCustomerRequest, FindAllCustomers, UpdateCustomerRequest};
pub use self::form::{PlaceOrderForm, UpdateProfileForm};
pub use self::order::{CreateOrderRequest, FindAllOrders, UpdateOrderRequest, validate_amount};

/// JSON keys a payload must carry, checked in declaration order before deserializing.
pub trait RequiredFields {
    const REQUIRED: &'static [&'static str];
}

pub(crate) fn default_page() -> i32 {
    1
}

pub(crate) fn default_page_size() -> i32 {
    10
}
