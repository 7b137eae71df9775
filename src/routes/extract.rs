//! Extractors whose rejections render through `AppError`, so malformed
//! input gets the same 400 envelope as a failed validation.

use axum::{
    Json,
    extract::{Path, Query},
};
use axum_extra::extract::WithRejection;

use crate::error::AppError;

pub type ApiJson<T> = WithRejection<Json<T>, AppError>;
pub type ApiQuery<T> = WithRejection<Query<T>, AppError>;
pub type ApiPath<T> = WithRejection<Path<T>, AppError>;
