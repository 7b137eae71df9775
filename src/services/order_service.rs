use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait, ActiveValue::NotSet, sea_query::LockType,
};

use crate::{
    dto::orders::{CartLine, CheckoutReceipt, CheckoutRequest, OrderHistory},
    entity::{
        food_items::{ActiveModel as FoodActive, Column as FoodCol, Entity as FoodItems},
        transactions::{ActiveModel as TransactionActive, Model as TransactionModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer},
    models::{OrderHistoryEntry, Transaction},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub fn validate_cart(cart: &[CartLine]) -> AppResult<()> {
    if cart.is_empty() {
        return Err(AppError::BadRequest(
            "Cart is empty. Cannot proceed with checkout.".into(),
        ));
    }
    if let Some(line) = cart.iter().find(|line| line.quantity <= 0) {
        return Err(AppError::BadRequest(format!(
            "Invalid quantity {} for food item {}",
            line.quantity, line.food_item_id
        )));
    }
    Ok(())
}

/// Buys every cart line or none of them.
///
/// All referenced rows are locked up front in id order so concurrent carts
/// touching the same items queue behind each other instead of overselling.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<CheckoutReceipt>> {
    ensure_customer(user)?;
    let cart = payload.cart;
    validate_cart(&cart)?;

    let ids: BTreeSet<i32> = cart.iter().map(|line| line.food_item_id).collect();

    let txn = state.orm.begin().await?;

    let mut stock: HashMap<i32, _> = FoodItems::find()
        .filter(FoodCol::Id.is_in(ids.iter().copied()))
        .order_by_asc(FoodCol::Id)
        .lock(LockType::Update)
        .all(&txn)
        .await?
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

    let mut transactions = Vec::with_capacity(cart.len());
    let mut total_price: i64 = 0;

    for line in &cart {
        let item = stock.get_mut(&line.food_item_id).ok_or_else(|| {
            AppError::NotFound(format!("Food item {} not found", line.food_item_id))
        })?;

        if item.quantity < line.quantity {
            return Err(AppError::BadRequest(format!(
                "Insufficient stock for {}. Available: {}, requested: {}",
                item.name, item.quantity, line.quantity
            )));
        }
        let line_total = item
            .price
            .checked_mul(i64::from(line.quantity))
            .ok_or_else(|| AppError::BadRequest("Order total is too large".into()))?;
        total_price = total_price
            .checked_add(line_total)
            .ok_or_else(|| AppError::BadRequest("Order total is too large".into()))?;

        item.quantity -= line.quantity;

        let record = TransactionActive {
            id: NotSet,
            seller_id: Set(item.seller_id),
            customer_id: Set(user.user_id),
            food_item_id: Set(Some(item.id)),
            food_item_name: Set(item.name.clone()),
            quantity: Set(line.quantity),
            total_price: Set(line_total),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        transactions.push(transaction_from_entity(record));
    }

    for id in &ids {
        if let Some(item) = stock.remove(id) {
            let remaining = item.quantity;
            let mut active: FoodActive = item.into();
            active.quantity = Set(remaining);
            active.update(&txn).await?;
        }
    }

    txn.commit().await?;

    tracing::info!(
        customer_id = user.user_id,
        lines = transactions.len(),
        total_price,
        "checkout completed"
    );

    Ok(ApiResponse::success(
        "Checkout successful!",
        CheckoutReceipt {
            transactions,
            total_price,
        },
        Some(Meta::empty()),
    ))
}

pub async fn order_history(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderHistory>> {
    let (page, limit, offset) = pagination.normalize();

    let items = sqlx::query_as::<_, OrderHistoryEntry>(
        r#"
        SELECT t.id, t.seller_id, u.username AS seller_name, t.food_item_id,
               t.food_item_name, t.quantity, t.total_price, t.created_at
        FROM transactions t
        JOIN users u ON u.id = t.seller_id
        WHERE t.customer_id = $1
        ORDER BY t.created_at DESC, t.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user.user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions WHERE customer_id = $1")
        .bind(user.user_id)
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success(
        "Order history",
        OrderHistory { items },
        Some(meta),
    ))
}

pub(crate) fn transaction_from_entity(model: TransactionModel) -> Transaction {
    Transaction {
        id: model.id,
        seller_id: model.seller_id,
        customer_id: model.customer_id,
        food_item_id: model.food_item_id,
        food_item_name: model.food_item_name,
        quantity: model.quantity,
        total_price: model.total_price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
