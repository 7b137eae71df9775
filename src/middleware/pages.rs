use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    middleware::auth::{AUTH_COOKIE, decode_token},
    state::AppState,
};

/// Path prefixes that need a valid session cookie before the page is served.
pub const PROTECTED_PAGES: [&str; 2] = ["/customer-dashboard", "/seller-dashboard"];

pub fn login_redirect(path: &str) -> String {
    format!("/?redirect={path}")
}

/// Redirects to the login page unless the request carries a valid auth cookie.
pub async fn require_login(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let authenticated = jar
        .get(AUTH_COOKIE)
        .is_some_and(|cookie| decode_token(&state.config.jwt_secret, cookie.value()).is_ok());
    if authenticated {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    tracing::info!(path = %path, "no valid session, redirecting to login");
    Redirect::to(&login_redirect(&path)).into_response()
}
