use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductSales {
    /// `None` once the food item has been deleted.
    pub food_item_id: Option<i32>,
    pub food_item_name: String,
    pub total_sales: i64,
    pub units_sold: i64,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SalesReport {
    pub total_revenue: i64,
    pub unique_customers: i64,
    pub returning_customers: i64,
    pub top_selling_products: Vec<ProductSales>,
    pub top_product: Option<ProductSales>,
}
