use std::path::Path;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, ActiveValue::NotSet,
};
use uuid::Uuid;

use crate::{
    dto::food::{FoodItemList, FoodListing, FoodListingList, NewFoodItem, UpdateFoodRequest},
    entity::{
        Users,
        food_items::{ActiveModel, Column, Entity as FoodItems, Model as FoodItemModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_seller},
    models::FoodItem,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Public URL prefix under which uploaded images are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// In-stock items for the customer storefront, newest first.
pub async fn list_food_items(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<FoodListingList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = FoodItems::find()
        .filter(Column::Quantity.gt(0))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .find_also_related(Users)
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(item, seller)| FoodListing {
            food_item: food_item_from_entity(item),
            seller_location: seller.map(|s| s.location),
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Food items",
        FoodListingList { items },
        Some(meta),
    ))
}

pub async fn get_food_item(state: &AppState, id: i32) -> AppResult<ApiResponse<FoodItem>> {
    let item = FoodItems::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Food item"))?;
    Ok(ApiResponse::success(
        "Food item",
        food_item_from_entity(item),
        None,
    ))
}

pub async fn list_seller_items(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<FoodItemList>> {
    ensure_seller(user)?;
    let items: Vec<FoodItem> = FoodItems::find()
        .filter(Column::SellerId.eq(user.user_id))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(food_item_from_entity)
        .collect();

    let meta = Meta::single_page(items.len());
    Ok(ApiResponse::success(
        "Seller products",
        FoodItemList { items },
        Some(meta),
    ))
}

pub async fn create_food_item(
    state: &AppState,
    user: &AuthUser,
    payload: NewFoodItem,
) -> AppResult<ApiResponse<FoodItem>> {
    ensure_seller(user)?;
    validate_new_food(&payload)?;

    let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&payload.image_name));
    let file_path = state.config.upload_dir.join(&file_name);
    tokio::fs::create_dir_all(&state.config.upload_dir).await?;
    tokio::fs::write(&file_path, &payload.image_bytes).await?;

    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name.trim().to_string()),
        quantity: Set(payload.quantity),
        price: Set(payload.price),
        description: Set(payload.description.trim().to_string()),
        image_url: Set(format!("{UPLOADS_URL_PREFIX}/{file_name}")),
        seller_id: Set(user.user_id),
        created_at: NotSet,
    };
    let item = match active.insert(&state.orm).await {
        Ok(item) => item,
        Err(err) => {
            remove_image_file(&file_path).await;
            return Err(err.into());
        }
    };

    tracing::info!(food_item_id = item.id, seller_id = user.user_id, "food item created");
    Ok(ApiResponse::success(
        "Food item created",
        food_item_from_entity(item),
        Some(Meta::empty()),
    ))
}

pub async fn update_food_item(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateFoodRequest,
) -> AppResult<ApiResponse<FoodItem>> {
    ensure_seller(user)?;
    let existing = find_owned_item(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        active.name = Set(name);
    }
    if let Some(quantity) = payload.quantity {
        if quantity < 0 {
            return Err(AppError::BadRequest("quantity must not be negative".into()));
        }
        active.quantity = Set(quantity);
    }
    if let Some(price) = payload.price {
        if price < 0 {
            return Err(AppError::BadRequest("price must not be negative".into()));
        }
        active.price = Set(price);
    }
    if let Some(description) = payload.description {
        active.description = Set(description.trim().to_string());
    }

    let item = active.update(&state.orm).await?;

    tracing::info!(food_item_id = item.id, "food item updated");
    Ok(ApiResponse::success(
        "Product updated",
        food_item_from_entity(item),
        Some(Meta::empty()),
    ))
}

pub async fn delete_food_item(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_seller(user)?;
    let existing = find_owned_item(state, user, id).await?;

    let result = FoodItems::delete_by_id(existing.id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Food item"));
    }

    if let Some(file_name) = existing
        .image_url
        .strip_prefix(UPLOADS_URL_PREFIX)
        .map(|rest| rest.trim_start_matches('/'))
        .filter(|rest| !rest.is_empty() && !rest.contains('/'))
    {
        remove_image_file(&state.config.upload_dir.join(file_name)).await;
    }

    tracing::info!(food_item_id = id, seller_id = user.user_id, "food item deleted");
    Ok(ApiResponse::success(
        "Product deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub fn validate_new_food(payload: &NewFoodItem) -> AppResult<()> {
    if payload.name.trim().is_empty()
        || payload.description.trim().is_empty()
        || payload.image_bytes.is_empty()
    {
        return Err(AppError::BadRequest("All fields are required".into()));
    }
    if payload.quantity <= 0 {
        return Err(AppError::BadRequest("quantity must be greater than 0".into()));
    }
    if payload.price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    Ok(())
}

/// Keeps only the final path component and replaces anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

async fn find_owned_item(state: &AppState, user: &AuthUser, id: i32) -> AppResult<FoodItemModel> {
    let item = FoodItems::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Food item"))?;
    if item.seller_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(item)
}

async fn remove_image_file(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        tracing::warn!(error = %err, path = %path.display(), "failed to remove image file");
    }
}

pub(crate) fn food_item_from_entity(model: FoodItemModel) -> FoodItem {
    FoodItem {
        id: model.id,
        name: model.name,
        quantity: model.quantity,
        price: model.price,
        description: model.description,
        image_url: model.image_url,
        seller_id: model.seller_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
