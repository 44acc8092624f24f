pub mod auth;
pub mod common;
pub mod health;
pub mod missing_positive;
pub mod notes;
