use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
    ActiveValue::NotSet,
};

use crate::{
    config::AppConfig,
    dto::auth::{Claims, LoginRequest, LoginResponse, RecoverRequest, RegisterRequest, SessionUser},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Verified against when the username is unknown, so both login failures cost one argon2 run.
pub const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZRjwyJ66MjTvJVSG3k1OuQ$yIrn8+MNtBHCwFySIRYLR64gOFmLcKDes/4Eo5jk7zU";

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest {
        username,
        password,
        location,
        role,
    } = payload;
    let username = username.trim().to_string();
    let location = location.trim().to_string();
    let role = match role {
        Some(role) if !username.is_empty() && !password.is_empty() && !location.is_empty() => role,
        _ => return Err(AppError::BadRequest("All fields are required".into())),
    };

    let exist = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("Username is already taken".into()));
    }

    let password_hash = hash_password(&password)?;

    let user = UserActive {
        id: NotSet,
        username: Set(username),
        password_hash: Set(password_hash),
        location: Set(location),
        role: Set(role),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(username_conflict)?;

    tracing::info!(user_id = user.id, role = %user.role, "user registered");
    Ok(ApiResponse::success(
        "User registered successfully",
        user_from_entity(user),
        None,
    ))
}

/// Returns the raw token alongside the response so the route can set the cookie.
pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<(String, ApiResponse<LoginResponse>)> {
    let LoginRequest { username, password } = payload;
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".into(),
        ));
    }

    let user = Users::find()
        .filter(UserCol::Username.eq(username))
        .one(&state.orm)
        .await?;
    let stored_hash = user
        .as_ref()
        .map_or(UNKNOWN_USER_HASH, |u| u.password_hash.as_str());
    let verified = verify_password(&password, stored_hash)?;
    let user = match user {
        Some(u) if verified => u,
        _ => return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
    };

    let user = user_from_entity(user);
    let token = issue_token(&state.config, &user)?;

    tracing::info!(user_id = user.id, "user logged in");
    let resp = LoginResponse {
        token: token.clone(),
        user: SessionUser::from(&user),
    };
    Ok((
        token,
        ApiResponse::success("Login successful", resp, Some(Meta::empty())),
    ))
}

pub async fn recover_password(
    state: &AppState,
    payload: RecoverRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let username = payload.username.trim();
    if username.is_empty() || payload.new_password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and new password are required".into(),
        ));
    }

    let user = Users::find()
        .filter(UserCol::Username.eq(username))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let mut active: UserActive = user.into();
    active.password_hash = Set(hash_password(&payload.new_password)?);
    let user = active.update(&state.orm).await?;

    tracing::info!(user_id = user.id, "password reset");
    Ok(ApiResponse::success(
        "Password updated successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub fn issue_token(config: &AppConfig, user: &User) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.token_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Maps a lost check-then-insert race on `users.username` to the same 400 as the pre-check.
pub(crate) fn username_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest("Username is already taken".into())
        }
        _ => AppError::OrmError(err),
    }
}

pub(crate) fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        username: model.username,
        location: model.location,
        role: model.role,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
