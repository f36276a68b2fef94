use super::{RequiredFields, default_page, default_page_size};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Upper bound (exclusive) of a `NUMERIC(10, 2)` column.
const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() || amount.is_zero() {
        return Err(ValidationError::new("amount_positive")
            .with_message(Cow::Borrowed("Amount must be greater than zero")));
    }

    if amount.normalize().scale() > 2 {
        return Err(ValidationError::new("amount_scale")
            .with_message(Cow::Borrowed("Amount must have at most 2 decimal places")));
    }

    if *amount >= MAX_AMOUNT {
        return Err(ValidationError::new("amount_range")
            .with_message(Cow::Borrowed("Amount must be less than 100000000")));
    }

    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllOrders {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Restrict the listing to one customer's orders.
    #[serde(default)]
    pub customer_id: Option<i32>,
}

impl Default for FindAllOrders {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            customer_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "Customer ID is required"))]
    #[schema(example = 1)]
    pub customer_id: i32,

    #[validate(length(min = 1, max = 255, message = "Item must be between 1 and 255 characters"))]
    #[schema(example = "Sunflower oil 5L")]
    pub item: String,

    #[validate(custom(function = "validate_amount"))]
    #[schema(value_type = String, example = "1250.00")]
    pub amount: Decimal,
}

impl RequiredFields for CreateOrderRequest {
    const REQUIRED: &'static [&'static str] = &["customer_id", "item", "amount"];
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[serde(skip)]
    pub id: i32,

    #[validate(range(min = 1, message = "Customer ID is required"))]
    #[schema(example = 1)]
    pub customer_id: i32,

    #[validate(length(min = 1, max = 255, message = "Item must be between 1 and 255 characters"))]
    #[schema(example = "Sunflower oil 5L")]
    pub item: String,

    #[validate(custom(function = "validate_amount"))]
    #[schema(value_type = String, example = "1250.00")]
    pub amount: Decimal,
}

impl RequiredFields for UpdateOrderRequest {
    const REQUIRED: &'static [&'static str] = &["customer_id", "item", "amount"];
}
