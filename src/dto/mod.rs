pub mod account;
pub mod auth;
pub mod food;
pub mod orders;
pub mod reports;
