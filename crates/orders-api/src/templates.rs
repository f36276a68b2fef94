use crate::domain::{
    requests::{PlaceOrderForm, UpdateProfileForm},
    response::OrderResponse,
};
use askama::Template;
use axum::response::Html;
use shared::errors::HttpError;
use tracing::error;

#[derive(Template, Debug)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: &'static str,
    pub signed_in_as: Option<String>,
    pub form: UpdateProfileForm,
    pub errors: Vec<String>,
}

#[derive(Template, Debug)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub title: &'static str,
    pub signed_in_as: Option<String>,
    pub form: PlaceOrderForm,
    pub orders: Vec<OrderResponse>,
    pub errors: Vec<String>,
}

pub fn render_page<T: Template>(template: &T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|e| {
        error!("❌ Failed to render page: {e}");
        HttpError::Internal("Failed to render page".to_string())
    })
}
