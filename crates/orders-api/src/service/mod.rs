mod customer;
mod oauth;
mod order;
mod session;
mod sms;

pub use self::customer::CustomerService;
pub use self::oauth::GoogleOAuthService;
pub use self::order::{OrderService, OrderServiceDeps, confirmation_message};
pub use self::session::SessionSigner;
pub use self::sms::{AfricasTalkingSms, LogOnlySms};

/// Clamps client-supplied paging to `page >= 1` and `1 <= page_size <= 100`.
pub(crate) fn normalize_paging(page: i32, page_size: i32) -> (i32, i32) {
    let page = page.max(1);
    let page_size = if page_size > 0 { page_size.min(100) } else { 10 };
    (page, page_size)
}
