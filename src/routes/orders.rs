use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use axum_extra::extract::WithRejection;

use crate::{
    dto::orders::{CheckoutReceipt, CheckoutRequest, OrderHistory},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::{
        extract::{ApiJson, ApiQuery},
        params::Pagination,
    },
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/update-order", post(checkout))
        .route("/order-history", get(order_history))
}

#[utoipa::path(
    post,
    path = "/api/update-order",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Cart purchased", body = ApiResponse<CheckoutReceipt>),
        (status = 400, description = "Empty cart, invalid quantity or insufficient stock"),
        (status = 403, description = "Not a customer"),
        (status = 404, description = "Food item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(payload), _): ApiJson<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<CheckoutReceipt>>> {
    let resp = order_service::checkout(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/order-history",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "Purchases of the current user", body = ApiResponse<OrderHistory>),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn order_history(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Query(pagination), _): ApiQuery<Pagination>,
) -> AppResult<Json<ApiResponse<OrderHistory>>> {
    let resp = order_service::order_history(&state, &user, pagination).await?;
    Ok(Json(resp))
}
