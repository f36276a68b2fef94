use crate::{
    domain::{
        requests::{PlaceOrderForm, UpdateCustomerRequest, UpdateProfileForm, validate_amount},
        response::{CustomerResponse, OrderResponse},
        session::SessionUser,
    },
    handler::auth::session_cookie,
    middleware::validate::format_validation_errors,
    state::AppState,
    templates::{IndexTemplate, OrdersTemplate, render_page},
};
use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use shared::errors::HttpError;
use std::sync::Arc;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use validator::Validate;

fn profile_form(customer: &CustomerResponse) -> UpdateProfileForm {
    UpdateProfileForm {
        name: customer.name.clone(),
        email: customer.email.clone(),
        contact: customer.contact.clone(),
    }
}

fn home_page(
    user: Option<&SessionUser>,
    form: UpdateProfileForm,
    errors: Vec<String>,
) -> IndexTemplate {
    IndexTemplate {
        title: "Home",
        signed_in_as: user.map(|u| u.name.clone()),
        form,
        errors,
    }
}

fn orders_page(
    user: Option<&SessionUser>,
    form: PlaceOrderForm,
    orders: Vec<OrderResponse>,
    errors: Vec<String>,
) -> OrdersTemplate {
    OrdersTemplate {
        title: "Orders",
        signed_in_as: user.map(|u| u.name.clone()),
        form,
        orders,
        errors,
    }
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    user: Option<Extension<SessionUser>>,
) -> Result<Response, HttpError> {
    let Some(Extension(user)) = user else {
        let page = home_page(None, UpdateProfileForm::default(), Vec::new());
        return Ok(render_page(&page)?.into_response());
    };

    let customer = state
        .di_container
        .customer_service
        .sync_profile(&user)
        .await?;

    let page = home_page(Some(&user), profile_form(&customer), Vec::new());
    Ok(render_page(&page)?.into_response())
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    user: Option<Extension<SessionUser>>,
    Form(form): Form<UpdateProfileForm>,
) -> Result<Response, HttpError> {
    let Some(Extension(user)) = user else {
        return Ok(Redirect::to("/login").into_response());
    };

    let form = UpdateProfileForm {
        name: form.name.trim().to_string(),
        email: user.email.clone(),
        contact: form.contact.trim().to_string(),
    };

    if let Err(errors) = form.validate() {
        let page = home_page(Some(&user), form, vec![format_validation_errors(&errors)]);
        return Ok((StatusCode::BAD_REQUEST, render_page(&page)?).into_response());
    }

    let service = &state.di_container.customer_service;
    let customer = service.sync_profile(&user).await?;

    // The row stays keyed on the login email so the next sign-in finds it again.
    let req = UpdateCustomerRequest {
        id: customer.id,
        name: form.name,
        email: customer.email,
        contact: form.contact,
    };

    let updated = service.update_customer(&req).await?.data;

    info!("✏️ Profile of customer {} updated", updated.id);

    let session = SessionUser {
        name: updated.name,
        email: updated.email,
        contact: Some(updated.contact).filter(|c| !c.is_empty()),
    };
    let token = state.di_container.session_service.issue(&session)?;
    let jar = jar.add(session_cookie(token, state.secure_cookies));

    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn orders(
    State(state): State<Arc<AppState>>,
    user: Option<Extension<SessionUser>>,
) -> Result<Response, HttpError> {
    let Some(Extension(user)) = user else {
        let page = orders_page(None, PlaceOrderForm::default(), Vec::new(), Vec::new());
        return Ok(render_page(&page)?.into_response());
    };

    let customer = state
        .di_container
        .customer_service
        .sync_profile(&user)
        .await?;
    let orders = state
        .di_container
        .order_service
        .find_by_customer(customer.id)
        .await?;

    let page = orders_page(Some(&user), PlaceOrderForm::default(), orders, Vec::new());
    Ok(render_page(&page)?.into_response())
}

pub async fn place_order(
    State(state): State<Arc<AppState>>,
    user: Option<Extension<SessionUser>>,
    Form(form): Form<PlaceOrderForm>,
) -> Result<Response, HttpError> {
    let Some(Extension(user)) = user else {
        return Ok(Redirect::to("/login").into_response());
    };

    let customer = state
        .di_container
        .customer_service
        .sync_profile(&user)
        .await?;

    let item = form.item.trim().to_string();
    let mut errors = Vec::new();

    if item.is_empty() || item.chars().count() > 255 {
        errors.push("Item must be between 1 and 255 characters".to_string());
    }

    let amount = match form.parse_amount() {
        Ok(amount) => match validate_amount(&amount) {
            Ok(()) => Some(amount),
            Err(e) => {
                errors.push(
                    e.message
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid amount".to_string()),
                );
                None
            }
        },
        Err(message) => {
            errors.push(message);
            None
        }
    };

    let amount = match amount {
        Some(amount) if errors.is_empty() => amount,
        _ => {
            let orders = state
                .di_container
                .order_service
                .find_by_customer(customer.id)
                .await?;
            let page = orders_page(Some(&user), form, orders, errors);
            return Ok((StatusCode::BAD_REQUEST, render_page(&page)?).into_response());
        }
    };

    let order = state
        .di_container
        .order_service
        .place_order(&customer, &item, amount)
        .await?;

    info!("🛒 Order {} placed from the orders page", order.id);

    Ok(Redirect::to("/orders").into_response())
}

pub fn ui_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/", get(index).post(update_profile))
        .route("/index", get(index))
        .route("/orders", get(orders).post(place_order))
        .with_state(app_state)
}
