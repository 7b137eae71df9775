use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use food_marketplace::{models::Transaction, services::report_service::summarize_sales};

fn tx(id: i32, customer_id: i32, food_item_id: Option<i32>, name: &str, quantity: i32, total_price: i64) -> Transaction {
    Transaction {
        id,
        seller_id: 1,
        customer_id,
        food_item_id,
        food_item_name: name.to_string(),
        quantity,
        total_price,
        created_at: Utc.with_ymd_and_hms(2024, 11, 3, 12, 0, id as u32).unwrap(),
    }
}

#[test]
fn empty_history_reports_zeroes() {
    let report = summarize_sales(&[]).expect("empty report");
    assert_eq!(report.total_revenue, 0);
    assert_eq!(report.unique_customers, 0);
    assert_eq!(report.returning_customers, 0);
    assert!(report.top_selling_products.is_empty());
    assert_eq!(report.top_product, None);
}

#[test]
fn aggregates_revenue_customers_and_products() {
    let transactions = vec![
        tx(1, 10, Some(100), "Nasi Lemak", 2, 700),
        tx(2, 11, Some(101), "Curry Puff", 4, 600),
        tx(3, 10, Some(101), "Curry Puff", 2, 300),
        tx(4, 12, Some(100), "Nasi Lemak", 1, 350),
        tx(5, 10, None, "Kaya Toast", 1, 280),
        tx(6, 11, Some(102), "Chicken Rice", 1, 450),
    ];

    let report = summarize_sales(&transactions).expect("report");

    assert_eq!(report.total_revenue, 700 + 600 + 300 + 350 + 280 + 450);
    assert_eq!(report.unique_customers, 3);
    // customers 10 and 11 bought more than once
    assert_eq!(report.returning_customers, 2);

    let ranking: Vec<(Option<i32>, i64, i64, i64)> = report
        .top_selling_products
        .iter()
        .map(|p| (p.food_item_id, p.total_sales, p.units_sold, p.transaction_count))
        .collect();
    assert_eq!(
        ranking,
        vec![
            (Some(100), 1050, 3, 2),
            (Some(101), 900, 6, 2),
            (Some(102), 450, 1, 1),
            (None, 280, 1, 1),
        ]
    );

    let top = report.top_product.expect("top product");
    assert_eq!(top.food_item_id, Some(100));
    assert_eq!(top.food_item_name, "Nasi Lemak");
}

#[test]
fn ties_break_on_units_then_id() {
    let transactions = vec![
        tx(1, 1, Some(9), "B", 1, 500),
        tx(2, 2, Some(3), "A", 1, 500),
        tx(3, 3, Some(5), "C", 5, 500),
    ];

    let report = summarize_sales(&transactions).expect("report");
    let ids: Vec<Option<i32>> = report
        .top_selling_products
        .iter()
        .map(|p| p.food_item_id)
        .collect();
    assert_eq!(ids, vec![Some(5), Some(3), Some(9)]);
    assert_eq!(report.returning_customers, 0);
}

#[test]
fn renamed_item_reports_latest_name() {
    let transactions = vec![
        tx(1, 1, Some(4), "Old Name", 1, 100),
        tx(2, 2, Some(4), "New Name", 1, 100),
    ];

    let report = summarize_sales(&transactions).expect("report");
    assert_eq!(report.top_selling_products.len(), 1);
    assert_eq!(report.top_selling_products[0].food_item_name, "New Name");
}

#[test]
fn revenue_overflow_is_an_error_not_a_wrap() {
    let transactions = vec![
        tx(1, 10, Some(100), "Caviar", 1, i64::MAX),
        tx(2, 11, Some(100), "Caviar", 1, i64::MAX),
    ];

    let err = summarize_sales(&transactions).expect_err("sum does not fit in i64");
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
