//! 稳定的 DTO 与 API 响应契约。
//!
//! 请求体字段全部为 `Option`：缺失与空字符串、与数值 0 必须可区分，
//! 由闸门的字段校验统一判定。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 店铺创建/更新请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRequest {
    pub name: Option<String>,
}

/// 店铺返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    pub store_id: String,
    pub user_id: String,
    pub name: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 广告牌创建/更新请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardRequest {
    pub label: Option<String>,
    pub image_url: Option<String>,
}

/// 广告牌返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardDto {
    pub billboard_id: String,
    pub store_id: String,
    pub label: String,
    pub image_url: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 分类创建/更新请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub billboard_id: Option<String>,
}

/// 分类返回结构。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub category_id: String,
    pub store_id: String,
    pub billboard_id: String,
    pub name: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 尺码/颜色共用的创建/更新请求体（name + value）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedValueRequest {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// 尺码返回结构。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeDto {
    pub size_id: String,
    pub store_id: String,
    pub name: String,
    pub value: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 颜色返回结构。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDto {
    pub color_id: String,
    pub store_id: String,
    pub name: String,
    pub value: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 商品图片输入。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageInput {
    #[serde(default)]
    pub url: String,
}

/// 商品创建/更新请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub images: Option<Vec<ImageInput>>,
    pub category_id: Option<String>,
    pub size_id: Option<String>,
    pub color_id: Option<String>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

/// 商品列表查询参数。
///
/// 均按原始字符串接收：空值视为不过滤，`isFeatured` 任意非空值即只看推荐商品。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub is_featured: Option<String>,
}

/// 商品图片返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub image_id: String,
    pub url: String,
}

/// 商品返回结构（附带图片与所引用的分类/尺码/颜色）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub product_id: String,
    pub store_id: String,
    pub category_id: String,
    pub size_id: String,
    pub color_id: String,
    pub name: String,
    pub price: f64,
    pub is_featured: bool,
    pub is_archived: bool,
    pub images: Vec<ImageDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorDto>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}
