//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers。
//! 路由包括：
//! - 健康检查：/health
//! - 店铺管理：/stores/*
//! - 广告牌管理：/stores/{id}/billboards/*
//! - 分类管理：/stores/{id}/categories/*
//! - 尺码管理：/stores/{id}/sizes/*
//! - 颜色管理：/stores/{id}/colors/*
//! - 商品管理：/stores/{id}/products/*

use super::AppState;
use super::handlers::*;
use axum::{Router, routing::get};

/// 创建 API 路由
///
/// 返回包含所有 API 端点的 Router，由 main 同时挂载在 / 与 /api 下
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/stores", get(list_stores).post(create_store))
        .route(
            "/stores/:store_id",
            get(get_store).patch(update_store).delete(delete_store),
        )
        .route(
            "/stores/:store_id/billboards",
            get(list_billboards).post(create_billboard),
        )
        .route(
            "/stores/:store_id/billboards/:billboard_id",
            get(get_billboard)
                .patch(update_billboard)
                .delete(delete_billboard),
        )
        .route(
            "/stores/:store_id/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/stores/:store_id/categories/:category_id",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
        .route("/stores/:store_id/sizes", get(list_sizes).post(create_size))
        .route(
            "/stores/:store_id/sizes/:size_id",
            get(get_size).patch(update_size).delete(delete_size),
        )
        .route("/stores/:store_id/colors", get(list_colors).post(create_color))
        .route(
            "/stores/:store_id/colors/:color_id",
            get(get_color).patch(update_color).delete(delete_color),
        )
        .route(
            "/stores/:store_id/products",
            get(list_products).post(create_product),
        )
        .route(
            "/stores/:store_id/products/:product_id",
            get(get_product)
                .patch(update_product)
                .delete(delete_product),
        )
}
