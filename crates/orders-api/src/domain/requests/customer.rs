use super::{RequiredFields, default_page, default_page_size};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllCustomers {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Case-insensitive match on name or email.
    #[serde(default)]
    pub search: String,
}

impl Default for FindAllCustomers {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Jane Wanjiku")]
    pub name: String,

    #[validate(
        email(message = "Email must be a valid address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[validate(length(min = 1, max = 255, message = "Contact must be between 1 and 255 characters"))]
    #[schema(example = "+254712345678")]
    pub contact: String,
}

impl RequiredFields for CreateCustomerRequest {
    const REQUIRED: &'static [&'static str] = &["name", "email", "contact"];
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerRequest {
    #[serde(skip)]
    pub id: i32,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Jane Wanjiku")]
    pub name: String,

    #[validate(
        email(message = "Email must be a valid address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[validate(length(min = 1, max = 255, message = "Contact must be between 1 and 255 characters"))]
    #[schema(example = "+254712345678")]
    pub contact: String,
}

impl RequiredFields for UpdateCustomerRequest {
    const REQUIRED: &'static [&'static str] = &["name", "email", "contact"];
}
