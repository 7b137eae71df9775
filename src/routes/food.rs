use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Path, Query, State,
        multipart::MultipartError,
    },
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;

use crate::{
    dto::food::{FoodItemList, FoodListingList, NewFoodItem, UpdateFoodRequest, UploadFoodForm},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_seller},
    models::FoodItem,
    response::ApiResponse,
    routes::{
        extract::{ApiJson, ApiPath, ApiQuery},
        params::Pagination,
    },
    services::food_service,
    state::AppState,
};

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/food-items", get(list_food_items))
        .route(
            "/food/{id}",
            get(get_food_item)
                .patch(update_food_item)
                .delete(delete_food_item),
        )
        .route("/display-food-by-seller-id", get(list_seller_items))
        .route(
            "/upload-food",
            post(upload_food).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

#[utoipa::path(
    get,
    path = "/api/food-items",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "In-stock food items with seller location", body = ApiResponse<FoodListingList>)
    ),
    tag = "Food"
)]
pub async fn list_food_items(
    State(state): State<AppState>,
    WithRejection(Query(pagination), _): ApiQuery<Pagination>,
) -> AppResult<Json<ApiResponse<FoodListingList>>> {
    let resp = food_service::list_food_items(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/food/{id}",
    params(
        ("id" = i32, Path, description = "Food item ID")
    ),
    responses(
        (status = 200, description = "Get food item", body = ApiResponse<FoodItem>),
        (status = 404, description = "Food item not found"),
    ),
    tag = "Food"
)]
pub async fn get_food_item(
    State(state): State<AppState>,
    WithRejection(Path(id), _): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<FoodItem>>> {
    let resp = food_service::get_food_item(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/food/{id}",
    params(
        ("id" = i32, Path, description = "Food item ID")
    ),
    request_body = UpdateFoodRequest,
    responses(
        (status = 200, description = "Updated food item", body = ApiResponse<FoodItem>),
        (status = 403, description = "Not the owning seller"),
        (status = 404, description = "Food item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Food"
)]
pub async fn update_food_item(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(id), _): ApiPath<i32>,
    WithRejection(Json(payload), _): ApiJson<UpdateFoodRequest>,
) -> AppResult<Json<ApiResponse<FoodItem>>> {
    let resp = food_service::update_food_item(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/food/{id}",
    params(
        ("id" = i32, Path, description = "Food item ID")
    ),
    responses(
        (status = 200, description = "Deleted food item", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Not the owning seller"),
        (status = 404, description = "Food item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Food"
)]
pub async fn delete_food_item(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(id), _): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = food_service::delete_food_item(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/display-food-by-seller-id",
    responses(
        (status = 200, description = "Food items owned by the current seller", body = ApiResponse<FoodItemList>),
        (status = 403, description = "Not a seller"),
    ),
    security(("bearer_auth" = [])),
    tag = "Food"
)]
pub async fn list_seller_items(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FoodItemList>>> {
    let resp = food_service::list_seller_items(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/upload-food",
    request_body(content = UploadFoodForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Food item created", body = ApiResponse<FoodItem>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 403, description = "Not a seller"),
    ),
    security(("bearer_auth" = [])),
    tag = "Food"
)]
pub async fn upload_food(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<FoodItem>>)> {
    ensure_seller(&user)?;
    let payload = read_upload_form(multipart).await?;
    let resp = food_service::create_food_item(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

async fn read_upload_form(mut multipart: Multipart) -> AppResult<NewFoodItem> {
    let mut name = None;
    let mut quantity = None;
    let mut price = None;
    let mut description = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = Some(field.text().await.map_err(bad_multipart)?),
            "quantity" => quantity = Some(field.text().await.map_err(bad_multipart)?),
            "price" => price = Some(field.text().await.map_err(bad_multipart)?),
            "description" => description = Some(field.text().await.map_err(bad_multipart)?),
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                image = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (Some(name), Some(quantity), Some(price), Some(description), Some((image_name, image_bytes))) =
        (name, quantity, price, description, image)
    else {
        return Err(AppError::BadRequest("All fields are required".into()));
    };

    let quantity = quantity
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest("quantity must be a whole number".into()))?;
    let price = price
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("price must be a whole number".into()))?;

    Ok(NewFoodItem {
        name,
        quantity,
        price,
        description,
        image_name,
        image_bytes,
    })
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}
