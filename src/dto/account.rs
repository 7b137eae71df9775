use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Role;

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountView {
    pub id: i32,
    pub username: String,
    pub location: String,
    pub role: Role,
}

/// Blank strings are treated the same as absent fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub new_username: Option<String>,
    pub password: Option<String>,
    pub location: Option<String>,
}
