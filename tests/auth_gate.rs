mod common;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, StatusCode, header},
};
use food_marketplace::{
    error::AppError,
    middleware::{
        auth::{AUTH_COOKIE, decode_token, token_from_headers},
        pages::login_redirect,
    },
    models::Role,
    routes::{auth::session_cookie, create_app},
    services::auth_service::{UNKNOWN_USER_HASH, hash_password, verify_password},
};
use tower::ServiceExt;

use common::{TEST_SECRET, json_body, offline_state, token_for};

#[tokio::test]
async fn issued_token_decodes_to_same_user() {
    let state = offline_state();
    let token = token_for(&state, 42, Role::Seller);

    let user = decode_token(TEST_SECRET, &token).expect("valid token");
    assert_eq!(user.user_id, 42);
    assert_eq!(user.username, "user-42");
    assert_eq!(user.role, Role::Seller);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    let state = offline_state();
    let token = token_for(&state, 7, Role::Customer);

    let err = decode_token("another-secret", &token).expect_err("must be rejected");
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn bearer_header_wins_over_cookie() {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_static("theme=dark; authToken=from-cookie"),
    );
    assert_eq!(token_from_headers(&headers).as_deref(), Some("from-cookie"));

    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Bearer from-header"),
    );
    assert_eq!(token_from_headers(&headers).as_deref(), Some("from-header"));
}

#[test]
fn no_token_anywhere() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    assert_eq!(token_from_headers(&headers), None);
}

#[test]
fn unknown_user_hash_is_verifiable_and_never_matches() {
    for guess in ["", "hunter22", "password"] {
        assert!(!verify_password(guess, UNKNOWN_USER_HASH).expect("parsable hash"));
    }

    let stored = hash_password("hunter22").expect("hash");
    assert!(verify_password("hunter22", &stored).expect("verify"));
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(Request::get("/api/account").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Missing token");
}

#[tokio::test]
async fn protected_route_with_garbage_token_is_unauthorized() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(
            Request::get("/api/order-history")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn customer_cannot_read_sales_report() {
    let state = offline_state();
    let token = token_for(&state, 3, Role::Customer);
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::get("/api/sales-report")
                .header(header::COOKIE, format!("{AUTH_COOKIE}={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn seller_cannot_check_out() {
    let state = offline_state();
    let token = token_for(&state, 4, Role::Seller);
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::post("/api/update-order")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"cart":[{"food_item_id":1,"quantity":1}]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn empty_cart_is_rejected_before_touching_stock() {
    let state = offline_state();
    let token = token_for(&state, 5, Role::Customer);
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::post("/api/update-order")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"cart":[]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Cart is empty. Cannot proceed with checkout.");
}

#[tokio::test]
async fn malformed_cart_line_is_a_bad_request() {
    let state = offline_state();
    let token = token_for(&state, 5, Role::Customer);
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::post("/api/update-order")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"cart":[{"id":1}]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let message = body["message"].as_str().expect("message string");
    assert!(message.contains("missing field `quantity`"), "{message}");
    assert_eq!(body["data"]["error"], body["message"]);
}

#[tokio::test]
async fn unknown_role_is_a_bad_request() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(
            Request::post("/api/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username":"mallory","password":"pw","location":"Yishun","role":"admin"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().is_some_and(|m| m.contains("admin")));
}

#[tokio::test]
async fn non_numeric_food_id_is_a_bad_request() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(Request::get("/api/food/lunch").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn dashboard_without_session_redirects_to_login() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(
            Request::get("/seller-dashboard/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        login_redirect("/seller-dashboard/products").as_str()
    );
}

#[tokio::test]
async fn dashboard_with_session_is_served() {
    let state = offline_state();
    let token = token_for(&state, 9, Role::Customer);
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::get("/customer-dashboard")
                .header(header::COOKIE, format!("{AUTH_COOKIE}={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // no frontend build in the scratch dir, so the file server answers 404 itself
    assert_ne!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn logout_expires_the_cookie() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(
            Request::post("/api/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{AUTH_COOKIE}=")));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn session_cookie_is_http_only() {
    let state = offline_state();
    let session = session_cookie(&state.config, "abc".into());

    assert_eq!(session.name(), AUTH_COOKIE);
    assert_eq!(session.value(), "abc");
    assert_eq!(session.http_only(), Some(true));
    assert_eq!(session.path(), Some("/"));
    assert_eq!(session.secure(), Some(false));
    assert_eq!(
        session.max_age(),
        Some(cookie::time::Duration::hours(state.config.token_ttl_hours))
    );
}

#[tokio::test]
async fn unknown_path_returns_json_not_found() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["data"]["path"], "/nowhere");
}

#[tokio::test]
async fn dashboard_sibling_path_is_not_served() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(
            Request::get("/customer-dashboardX")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["data"]["path"], "/customer-dashboardX");
}
