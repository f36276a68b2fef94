use crate::model::Customer;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct CustomerResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl From<Customer> for CustomerResponse {
    fn from(value: Customer) -> Self {
        CustomerResponse {
            id: value.id,
            name: value.name,
            email: value.email,
            contact: value.contact,
        }
    }
}
