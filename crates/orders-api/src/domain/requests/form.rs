use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use validator::Validate;

/// Profile form posted from the home page. The email is display-only: it is the
/// login identity the customer row is keyed on, so a posted value is dropped.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[serde(skip_deserializing)]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Contact is required"))]
    pub contact: String,
}

/// Order form posted from the orders page. The amount arrives as text so a malformed
/// value can be reported back on the page instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceOrderForm {
    #[serde(default)]
    pub item: String,

    #[serde(default)]
    pub amount: String,
}

impl PlaceOrderForm {
    pub fn parse_amount(&self) -> Result<Decimal, String> {
        let raw = self.amount.trim();
        if raw.is_empty() {
            return Err("Amount is required".to_string());
        }
        Decimal::from_str(raw).map_err(|_| format!("'{raw}' is not a valid amount"))
    }
}
