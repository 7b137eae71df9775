use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::FoodItem;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFoodRequest {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<i64>,
    pub description: Option<String>,
}

/// Fields accepted by the multipart upload endpoint.
#[derive(Debug, ToSchema)]
pub struct UploadFoodForm {
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub description: String,
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Parsed upload before the image hits the disk.
#[derive(Debug)]
pub struct NewFoodItem {
    pub name: String,
    pub quantity: i32,
    pub price: i64,
    pub description: String,
    pub image_name: String,
    pub image_bytes: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FoodListing {
    pub food_item: FoodItem,
    pub seller_location: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FoodListingList {
    #[schema(value_type = Vec<FoodListing>)]
    pub items: Vec<FoodListing>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FoodItemList {
    #[schema(value_type = Vec<FoodItem>)]
    pub items: Vec<FoodItem>,
}
