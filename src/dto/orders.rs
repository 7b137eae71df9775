use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{OrderHistoryEntry, Transaction};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartLine {
    #[serde(alias = "id")]
    pub food_item_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub cart: Vec<CartLine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutReceipt {
    pub transactions: Vec<Transaction>,
    pub total_price: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderHistory {
    #[schema(value_type = Vec<OrderHistoryEntry>)]
    pub items: Vec<OrderHistoryEntry>,
}
