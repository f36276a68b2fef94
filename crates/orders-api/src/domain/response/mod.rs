mod api;
mod customer;
mod order;

pub use self::api::{ApiResponse, ApiResponsePagination, MessageResponse, Pagination};
pub use self::customer::CustomerResponse;
pub use self::order::OrderResponse;
