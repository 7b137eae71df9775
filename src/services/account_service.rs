use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::{
    dto::account::{AccountView, UpdateAccountRequest},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::auth_service::{hash_password, username_conflict},
    state::AppState,
};

pub async fn get_account(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<AccountView>> {
    let account = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(ApiResponse::success(
        "Account",
        account_from_entity(account),
        Some(Meta::empty()),
    ))
}

pub async fn update_account(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateAccountRequest,
) -> AppResult<ApiResponse<AccountView>> {
    let existing = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let new_username = non_blank(payload.new_username);
    let password = payload.password.filter(|p| !p.is_empty());
    let location = non_blank(payload.location);

    let mut active: UserActive = existing.clone().into();

    if let Some(new_username) = new_username.filter(|name| *name != existing.username) {
        let taken = Users::find()
            .filter(UserCol::Username.eq(new_username.as_str()))
            .one(&state.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::BadRequest("Username already taken".into()));
        }
        active.username = Set(new_username);
    }
    if let Some(password) = password {
        active.password_hash = Set(hash_password(&password)?);
    }
    if let Some(location) = location {
        active.location = Set(location);
    }

    let account = if active.is_changed() {
        active.update(&state.orm).await.map_err(username_conflict)?
    } else {
        existing
    };

    tracing::info!(user_id = account.id, "account updated");
    Ok(ApiResponse::success(
        "Account updated successfully",
        account_from_entity(account),
        Some(Meta::empty()),
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn account_from_entity(model: UserModel) -> AccountView {
    AccountView {
        id: model.id,
        username: model.username,
        location: model.location,
        role: model.role,
    }
}
