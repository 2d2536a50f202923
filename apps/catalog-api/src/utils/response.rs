//! HTTP 响应辅助函数和 DTO 转换
//!
//! 提供统一的错误响应构造函数和 DTO 转换函数：
//! - 错误响应：unauthenticated_error, forbidden_error, bad_request_error, not_found_error, internal_error
//! - 闸门/存储错误映射：gate_error, storage_error（内部错误先按资源标签记录日志）
//! - DTO 转换：store_to_dto, billboard_to_dto, category_to_dto, size_to_dto, color_to_dto, product_to_dto
//!
//! 设计原则：
//! - 所有错误返回统一的 ApiResponse 格式
//! - 内部错误详情只进日志，响应体固定为 "internal error"

use api_contract::{
    ApiResponse, BillboardDto, CategoryDto, ColorDto, ImageDto, ProductDto, SizeDto, StoreDto,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_gate::GateError;
use catalog_storage::{
    BillboardRecord, CategoryRecord, ColorRecord, ProductRecord, SizeRecord, StorageError,
    StoreRecord,
};
use serde::Serialize;

/// 成功响应
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 未认证错误响应
pub fn unauthenticated_error() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(
            "AUTH.UNAUTHENTICATED",
            "unauthenticated",
        )),
    )
        .into_response()
}

/// 禁止访问错误响应
pub fn forbidden_error() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ApiResponse::<()>::error("AUTH.FORBIDDEN", "forbidden")),
    )
        .into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 内部错误响应
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", "internal error")),
    )
        .into_response()
}

/// 存储错误响应（按资源标签记录日志，例如 `BILLBOARD_PATCH`）
pub fn storage_error(tag: &str, err: StorageError) -> Response {
    tracing::error!(tag, error = %err, "storage operation failed");
    internal_error()
}

/// 闸门错误响应
pub fn gate_error(tag: &str, err: GateError) -> Response {
    match err {
        GateError::Unauthenticated => unauthenticated_error(),
        GateError::Forbidden => forbidden_error(),
        GateError::InvalidInput { .. } => bad_request_error(err.to_string()),
        GateError::NotFound(_) => not_found_error(),
        GateError::Internal(err) => storage_error(tag, err),
    }
}

/// StoreRecord 转 StoreDto
pub fn store_to_dto(record: StoreRecord) -> StoreDto {
    StoreDto {
        store_id: record.store_id,
        user_id: record.user_id,
        name: record.name,
        created_at_ms: record.created_at_ms,
        updated_at_ms: record.updated_at_ms,
    }
}

/// BillboardRecord 转 BillboardDto
pub fn billboard_to_dto(record: BillboardRecord) -> BillboardDto {
    BillboardDto {
        billboard_id: record.billboard_id,
        store_id: record.store_id,
        label: record.label,
        image_url: record.image_url,
        created_at_ms: record.created_at_ms,
        updated_at_ms: record.updated_at_ms,
    }
}

/// CategoryRecord 转 CategoryDto
pub fn category_to_dto(record: CategoryRecord) -> CategoryDto {
    CategoryDto {
        category_id: record.category_id,
        store_id: record.store_id,
        billboard_id: record.billboard_id,
        name: record.name,
        created_at_ms: record.created_at_ms,
        updated_at_ms: record.updated_at_ms,
    }
}

/// SizeRecord 转 SizeDto
pub fn size_to_dto(record: SizeRecord) -> SizeDto {
    SizeDto {
        size_id: record.size_id,
        store_id: record.store_id,
        name: record.name,
        value: record.value,
        created_at_ms: record.created_at_ms,
        updated_at_ms: record.updated_at_ms,
    }
}

/// ColorRecord 转 ColorDto
pub fn color_to_dto(record: ColorRecord) -> ColorDto {
    ColorDto {
        color_id: record.color_id,
        store_id: record.store_id,
        name: record.name,
        value: record.value,
        created_at_ms: record.created_at_ms,
        updated_at_ms: record.updated_at_ms,
    }
}

/// 商品引用的分类/尺码/颜色（可能已不存在）。
#[derive(Debug, Default)]
pub struct ProductRefs {
    pub category: Option<CategoryDto>,
    pub size: Option<SizeDto>,
    pub color: Option<ColorDto>,
}

/// ProductRecord 转 ProductDto
pub fn product_to_dto(record: ProductRecord, refs: ProductRefs) -> ProductDto {
    ProductDto {
        product_id: record.product_id,
        store_id: record.store_id,
        category_id: record.category_id,
        size_id: record.size_id,
        color_id: record.color_id,
        name: record.name,
        price: record.price,
        is_featured: record.is_featured,
        is_archived: record.is_archived,
        images: record
            .images
            .into_iter()
            .map(|image| ImageDto {
                image_id: image.image_id,
                url: image.url,
            })
            .collect(),
        category: refs.category,
        size: refs.size,
        color: refs.color,
        created_at_ms: record.created_at_ms,
        updated_at_ms: record.updated_at_ms,
    }
}
