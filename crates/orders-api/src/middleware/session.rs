use crate::{abstract_trait::DynSessionService, domain::session::SessionUser};
use axum::{Extension, body::Body, http::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

pub const SESSION_COOKIE: &str = "session";

/// Attaches the signed-in [`SessionUser`] to the request when the session cookie verifies.
/// Requests without a valid cookie pass through as anonymous.
pub async fn session_middleware(
    cookie_jar: CookieJar,
    Extension(sessions): Extension<DynSessionService>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(cookie) = cookie_jar.get(SESSION_COOKIE) {
        match sessions.verify(cookie.value()) {
            Ok(user) => {
                req.extensions_mut().insert::<SessionUser>(user);
            }
            Err(e) => debug!("Ignoring invalid session cookie: {e}"),
        }
    }

    next.run(req).await
}
