use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::reports::SalesReport,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/sales-report", get(sales_report))
}

#[utoipa::path(
    get,
    path = "/api/sales-report",
    responses(
        (status = 200, description = "Sales aggregates for the current seller", body = ApiResponse<SalesReport>),
        (status = 403, description = "Not a seller"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn sales_report(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SalesReport>>> {
    let resp = report_service::sales_report(&state, &user).await?;
    Ok(Json(resp))
}
