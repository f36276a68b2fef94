pub mod session;
pub mod validate;
