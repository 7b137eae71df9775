use axum::{Json, Router, extract::State, routing::get};
use axum_extra::extract::WithRejection;

use crate::{
    dto::account::{AccountView, UpdateAccountRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::extract::ApiJson,
    services::account_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/account", get(get_account).patch(update_account))
}

#[utoipa::path(
    get,
    path = "/api/account",
    responses(
        (status = 200, description = "Current account", body = ApiResponse<AccountView>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AccountView>>> {
    let resp = account_service::get_account(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/account",
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated account", body = ApiResponse<AccountView>),
        (status = 400, description = "Username already taken"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn update_account(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(payload), _): ApiJson<UpdateAccountRequest>,
) -> AppResult<Json<ApiResponse<AccountView>>> {
    let resp = account_service::update_account(&state, &user, payload).await?;
    Ok(Json(resp))
}
