use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_extra::extract::{CookieJar, WithRejection, cookie::{Cookie, SameSite}};

use crate::{
    config::AppConfig,
    dto::auth::{LoginRequest, LoginResponse, RecoverRequest, RegisterRequest},
    error::AppResult,
    middleware::auth::AUTH_COOKIE,
    models::User,
    response::{ApiResponse, Meta},
    routes::extract::ApiJson,
    services::auth_service::{login_user, recover_password, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/recover", post(recover))
}

/// HttpOnly cookie holding the session token for browser clients.
pub fn session_cookie(config: &AppConfig, token: String) -> Cookie<'static> {
    let mut session = Cookie::new(AUTH_COOKIE, token);
    session.set_http_only(true);
    session.set_path("/");
    session.set_same_site(SameSite::Lax);
    session.set_secure(config.cookie_secure);
    session.set_max_age(cookie::time::Duration::hours(config.token_ttl_hours));
    session
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user", body = ApiResponse<User>),
        (status = 400, description = "Missing fields or username taken")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = register_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user and set the auth cookie", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): ApiJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let (token, resp) = login_user(&state, payload).await?;
    let jar = jar.add(session_cookie(&state.config, token));
    Ok((jar, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Clear the auth cookie", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Auth"
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<serde_json::Value>>) {
    let mut cookie = Cookie::new(AUTH_COOKIE, "");
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.make_removal();
    let jar = jar.add(cookie);
    (
        jar,
        Json(ApiResponse::success(
            "Logout successful",
            serde_json::json!({}),
            Some(Meta::empty()),
        )),
    )
}

#[utoipa::path(
    post,
    path = "/api/recover",
    request_body = RecoverRequest,
    responses(
        (status = 200, description = "Reset password", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "User not found")
    ),
    tag = "Auth"
)]
pub async fn recover(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): ApiJson<RecoverRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = recover_password(&state, payload).await?;
    Ok(Json(resp))
}
