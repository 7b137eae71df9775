use std::collections::HashMap;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    dto::reports::{ProductSales, SalesReport},
    entity::transactions::{Column as TxCol, Entity as Transactions},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_seller},
    models::Transaction,
    response::{ApiResponse, Meta},
    services::order_service::transaction_from_entity,
    state::AppState,
};

pub async fn sales_report(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<SalesReport>> {
    ensure_seller(user)?;
    let transactions: Vec<Transaction> = Transactions::find()
        .filter(TxCol::SellerId.eq(user.user_id))
        .order_by_asc(TxCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(transaction_from_entity)
        .collect();

    let report = summarize_sales(&transactions)?;
    tracing::debug!(
        seller_id = user.user_id,
        transactions = transactions.len(),
        total_revenue = report.total_revenue,
        "sales report computed"
    );
    Ok(ApiResponse::success("Sales report", report, Some(Meta::empty())))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SalesKey {
    Item(i32),
    Removed(String),
}

pub fn summarize_sales(transactions: &[Transaction]) -> AppResult<SalesReport> {
    let mut total_revenue = 0_i64;
    let mut per_customer: HashMap<i32, i64> = HashMap::new();
    let mut per_item: HashMap<SalesKey, ProductSales> = HashMap::new();

    for tx in transactions {
        total_revenue = add_sales(total_revenue, tx.total_price)?;
        *per_customer.entry(tx.customer_id).or_default() += 1;

        let key = match tx.food_item_id {
            Some(id) => SalesKey::Item(id),
            None => SalesKey::Removed(tx.food_item_name.clone()),
        };
        let entry = per_item.entry(key).or_insert_with(|| ProductSales {
            food_item_id: tx.food_item_id,
            food_item_name: tx.food_item_name.clone(),
            total_sales: 0,
            units_sold: 0,
            transaction_count: 0,
        });
        // rows arrive in id order, so the last name seen is the most recent
        entry.food_item_name = tx.food_item_name.clone();
        entry.total_sales = add_sales(entry.total_sales, tx.total_price)?;
        entry.units_sold += i64::from(tx.quantity);
        entry.transaction_count += 1;
    }

    let mut top_selling_products: Vec<ProductSales> = per_item.into_values().collect();
    top_selling_products.sort_by(|a, b| {
        b.total_sales
            .cmp(&a.total_sales)
            .then(b.units_sold.cmp(&a.units_sold))
            .then(a.food_item_id.is_none().cmp(&b.food_item_id.is_none()))
            .then(a.food_item_id.cmp(&b.food_item_id))
            .then(a.food_item_name.cmp(&b.food_item_name))
    });

    let returning_customers = per_customer.values().filter(|count| **count > 1).count();

    Ok(SalesReport {
        total_revenue,
        unique_customers: per_customer.len() as i64,
        returning_customers: returning_customers as i64,
        top_product: top_selling_products.first().cloned(),
        top_selling_products,
    })
}

fn add_sales(total: i64, amount: i64) -> AppResult<i64> {
    total
        .checked_add(amount)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("sales total exceeds i64 range")))
}
