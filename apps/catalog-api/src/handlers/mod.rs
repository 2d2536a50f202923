//! Handlers 模块

pub mod billboards;
pub mod categories;
pub mod colors;
pub mod products;
pub mod sizes;
pub mod stores;

pub use billboards::*;
pub use categories::*;
pub use colors::*;
pub use products::*;
pub use sizes::*;
pub use stores::*;

use axum::{Json, response::IntoResponse};

/// 健康检查
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}
