use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        account::{AccountView, UpdateAccountRequest},
        auth::{LoginRequest, LoginResponse, RecoverRequest, RegisterRequest, SessionUser},
        food::{FoodItemList, FoodListing, FoodListingList, UpdateFoodRequest, UploadFoodForm},
        orders::{CartLine, CheckoutReceipt, CheckoutRequest, OrderHistory},
        reports::{ProductSales, SalesReport},
    },
    models::{FoodItem, OrderHistoryEntry, Role, Transaction, User},
    response::{ApiResponse, Meta},
    routes::{account, auth, food, health::{self, HealthData}, orders, params, reports},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        auth::recover,
        account::get_account,
        account::update_account,
        food::list_food_items,
        food::get_food_item,
        food::update_food_item,
        food::delete_food_item,
        food::list_seller_items,
        food::upload_food,
        orders::checkout,
        orders::order_history,
        reports::sales_report
    ),
    components(
        schemas(
            HealthData,
            Role,
            User,
            FoodItem,
            Transaction,
            OrderHistoryEntry,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            SessionUser,
            RecoverRequest,
            AccountView,
            UpdateAccountRequest,
            UpdateFoodRequest,
            UploadFoodForm,
            FoodListing,
            FoodListingList,
            FoodItemList,
            CartLine,
            CheckoutRequest,
            CheckoutReceipt,
            OrderHistory,
            ProductSales,
            SalesReport,
            params::Pagination,
            Meta,
            ApiResponse<FoodItem>,
            ApiResponse<FoodListingList>,
            ApiResponse<CheckoutReceipt>,
            ApiResponse<SalesReport>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and password recovery"),
        (name = "Account", description = "Current user account"),
        (name = "Food", description = "Food item listings"),
        (name = "Orders", description = "Checkout and order history"),
        (name = "Reports", description = "Seller sales statistics"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
