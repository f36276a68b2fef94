use crate::model::Order;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: i32,
    pub item: String,
    #[schema(value_type = String, example = "1250.00")]
    pub amount: Decimal,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.id,
            customer_id: value.customer_id,
            item: value.item,
            amount: value.amount,
            created_at: value.created_at.to_string(),
            updated_at: value.updated_at.to_string(),
        }
    }
}
