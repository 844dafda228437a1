pub mod api;
pub mod app_state;
pub mod auth;
pub mod clock;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod services;
pub mod session;

#[cfg(test)]
pub mod test_utils;

pub use app_state::AppState;
pub use errors::{AppError, AppResult};
