use crate::{middleware::session::SESSION_COOKIE, state::AppState};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use shared::{errors::HttpError, utils::generate_random_string};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa_axum::router::OpenApiRouter;

pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

#[derive(Debug, Deserialize)]
pub struct GoogleCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn auth_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub(crate) fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    auth_cookie(SESSION_COOKIE, token, secure)
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, HttpError> {
    let oauth_state = generate_random_string(32).map_err(|e| {
        HttpError::Internal(format!("Failed to generate OAuth state: {e}"))
    })?;

    let url = state
        .di_container
        .oauth_service
        .authorization_url(&oauth_state)?;

    let jar = jar.add(auth_cookie(
        OAUTH_STATE_COOKIE,
        oauth_state,
        state.secure_cookies,
    ));

    Ok((jar, Redirect::to(&url)))
}

pub async fn google_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<GoogleCallback>,
) -> Result<impl IntoResponse, HttpError> {
    let expected = jar.get(OAUTH_STATE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(removal(OAUTH_STATE_COOKIE));

    if let Some(error) = params.error {
        warn!("Google login was not completed: {error}");
        return Err(HttpError::BadRequest(format!("Login failed: {error}")));
    }

    match (expected, params.state) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => {
            warn!("Rejected Google callback with a mismatched state");
            return Err(HttpError::BadRequest("Invalid OAuth state".to_string()));
        }
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| HttpError::BadRequest("Missing authorization code".to_string()))?;

    let user = state.di_container.oauth_service.fetch_profile(&code).await?;
    let token = state.di_container.session_service.issue(&user)?;

    info!("🔓 {} signed in", user.email);

    let jar = jar.add(session_cookie(token, state.secure_cookies));

    Ok((jar, Redirect::to("/")))
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(removal(SESSION_COOKIE)), Redirect::to("/"))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/login", get(login))
        .route("/google-login", get(google_login))
        .route("/logout", get(logout))
        .with_state(app_state)
}
