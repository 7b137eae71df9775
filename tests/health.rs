mod common;

use axum::extract::State;
use food_marketplace::routes::health::health_check;

#[tokio::test]
async fn health_check_reports_unreachable_database() {
    let state = common::offline_state();
    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "unavailable");
    assert_eq!(data.version, env!("CARGO_PKG_VERSION"));
}
