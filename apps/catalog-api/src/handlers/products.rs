//! 商品 CRUD handlers
//!
//! 提供商品资源的增删改查接口：
//! - GET /stores/{id}/products - 列出商品（公开读，支持 categoryId/colorId/sizeId/isFeatured
//!   过滤，空值不过滤，排除已归档）
//! - POST /stores/{id}/products - 创建商品及图片
//! - GET /stores/{id}/products/{pid} - 获取商品详情（公开读）
//! - PATCH /stores/{id}/products/{pid} - 更新商品（字段整体替换，图片集合整体重建）
//! - DELETE /stores/{id}/products/{pid} - 删除商品及图片
//!
//! 权限要求：
//! - 写接口需要 Bearer token 认证，且店铺归属调用方
//! - 必填字段：name、price、images、categoryId、sizeId、colorId
//! - categoryId/sizeId/colorId 必须指向同一店铺的记录
//!
//! 返回的商品附带所引用的分类、尺码、颜色。

use crate::AppState;
use crate::handlers::StorePath;
use crate::middleware::{require_mutation, require_store_scope};
use crate::utils::{
    ProductRefs, bad_request_error, category_to_dto, color_to_dto, gate_error, not_found_error,
    ok, product_to_dto, same_store_reference, size_to_dto, storage_error, take_image_urls,
    take_text,
};
use api_contract::{ProductDto, ProductQuery, ProductRequest};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::HeaderMap,
    response::Response,
};
use catalog_gate::{GateError, ensure_exists};
use catalog_storage::{
    ProductFilter, ProductRecord, ProductUpdate, StorageError, build_images, now_epoch_ms,
};
use domain::{Operation, ResourceKind};
use std::collections::HashMap;
use uuid::Uuid;

const KIND: ResourceKind = ResourceKind::Product;

#[derive(serde::Deserialize)]
pub struct ProductPath {
    pub store_id: String,
    pub product_id: String,
}

/// 查询参数转存储层过滤条件（空值不过滤）
fn product_filter(query: ProductQuery) -> ProductFilter {
    let non_blank = |value: Option<String>| {
        value
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };
    ProductFilter {
        category_id: non_blank(query.category_id),
        color_id: non_blank(query.color_id),
        size_id: non_blank(query.size_id),
        featured_only: non_blank(query.is_featured).is_some(),
    }
}

/// 校验请求中的分类/尺码/颜色都属于作用域店铺，顺带返回其 DTO
async fn check_references(
    state: &AppState,
    store_id: &str,
    req: &ProductRequest,
) -> Result<ProductRefs, GateError> {
    let category = same_store_reference(
        state.category_store.as_ref(),
        store_id,
        req.category_id.as_deref().unwrap_or_default().trim(),
        "categoryId",
    )
    .await?;
    let size = same_store_reference(
        state.size_store.as_ref(),
        store_id,
        req.size_id.as_deref().unwrap_or_default().trim(),
        "sizeId",
    )
    .await?;
    let color = same_store_reference(
        state.color_store.as_ref(),
        store_id,
        req.color_id.as_deref().unwrap_or_default().trim(),
        "colorId",
    )
    .await?;
    Ok(ProductRefs {
        category: Some(category_to_dto(category)),
        size: Some(size_to_dto(size)),
        color: Some(color_to_dto(color)),
    })
}

/// 按 ID 加载单个商品的引用（已删除的引用留空）
async fn load_refs(
    state: &AppState,
    product: &ProductRecord,
) -> Result<ProductRefs, StorageError> {
    let category = state.category_store.find(&product.category_id).await?;
    let size = state.size_store.find(&product.size_id).await?;
    let color = state.color_store.find(&product.color_id).await?;
    Ok(ProductRefs {
        category: category.map(category_to_dto),
        size: size.map(size_to_dto),
        color: color.map(color_to_dto),
    })
}

/// 列出店铺商品
///
/// 店铺的分类/尺码/颜色各加载一次，再逐个商品拼装。
pub async fn list_products(
    State(state): State<AppState>,
    Path(path): Path<StorePath>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::List);
    let filter = match query {
        Ok(Query(query)) => product_filter(query),
        Err(rejection) => return bad_request_error(rejection.body_text()),
    };
    let products = match state
        .product_store
        .list_products(&path.store_id, &filter)
        .await
    {
        Ok(products) => products,
        Err(err) => return storage_error(&tag, err),
    };
    let lookups = async {
        let categories = state.category_store.list(&path.store_id).await?;
        let sizes = state.size_store.list(&path.store_id).await?;
        let colors = state.color_store.list(&path.store_id).await?;
        Ok::<_, StorageError>((categories, sizes, colors))
    };
    let (categories, sizes, colors) = match lookups.await {
        Ok(lookups) => lookups,
        Err(err) => return storage_error(&tag, err),
    };
    let categories: HashMap<String, _> = categories
        .into_iter()
        .map(|item| (item.category_id.clone(), category_to_dto(item)))
        .collect();
    let sizes: HashMap<String, _> = sizes
        .into_iter()
        .map(|item| (item.size_id.clone(), size_to_dto(item)))
        .collect();
    let colors: HashMap<String, _> = colors
        .into_iter()
        .map(|item| (item.color_id.clone(), color_to_dto(item)))
        .collect();

    let data: Vec<ProductDto> = products
        .into_iter()
        .map(|product| {
            let refs = ProductRefs {
                category: categories.get(&product.category_id).cloned(),
                size: sizes.get(&product.size_id).cloned(),
                color: colors.get(&product.color_id).cloned(),
            };
            product_to_dto(product, refs)
        })
        .collect();
    ok(data)
}

/// 创建商品
///
/// # 流程
///
/// 1. 闸门校验：身份 → 店铺归属 → 必填字段（价格非负、图片 URL 非空白）
/// 2. 校验分类/尺码/颜色属于同一店铺
/// 3. 生成商品 ID 与图片记录，原子写入
///
/// # 错误处理
///
/// - `401`: 无法解析调用方身份
/// - `403`: 店铺不存在或不属于调用方
/// - `400`: 必填字段缺失、取值非法或引用了其他店铺的记录
/// - `500`: 存储层错误（日志标签 `PRODUCTS_POST`）
pub async fn create_product(
    State(state): State<AppState>,
    Path(path): Path<StorePath>,
    headers: HeaderMap,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Create);
    let (scope, req) =
        match require_mutation(&state, &headers, &path.store_id, KIND, body, &tag).await {
            Ok(value) => value,
            Err(response) => return response,
        };
    let refs = match check_references(&state, &scope.store_id, &req).await {
        Ok(refs) => refs,
        Err(err) => return gate_error(&tag, err),
    };

    let now_ms = now_epoch_ms();
    let product_id = Uuid::new_v4().to_string();
    let image_urls = take_image_urls(req.images);
    let record = ProductRecord {
        images: build_images(&product_id, &image_urls, now_ms),
        product_id,
        store_id: scope.store_id.clone(),
        category_id: take_text(req.category_id),
        size_id: take_text(req.size_id),
        color_id: take_text(req.color_id),
        name: take_text(req.name),
        price: req.price.unwrap_or_default(),
        is_featured: req.is_featured.unwrap_or(false),
        is_archived: req.is_archived.unwrap_or(false),
        created_at_ms: now_ms,
        updated_at_ms: now_ms,
    };
    match state.product_store.create_product(&scope, record).await {
        Ok(product) => ok(product_to_dto(product, refs)),
        Err(err) => storage_error(&tag, err),
    }
}

/// 获取商品详情（含已归档商品）
pub async fn get_product(
    State(state): State<AppState>,
    Path(path): Path<ProductPath>,
) -> Response {
    let tag = KIND.log_tag(Operation::Get);
    let found = match state.product_store.find_product(&path.product_id).await {
        Ok(found) => found.filter(|item| item.store_id == path.store_id),
        Err(err) => return storage_error(&tag, err),
    };
    let product = match ensure_exists(found, KIND) {
        Ok(product) => product,
        Err(err) => return gate_error(&tag, err),
    };
    match load_refs(&state, &product).await {
        Ok(refs) => ok(product_to_dto(product, refs)),
        Err(err) => storage_error(&tag, err),
    }
}

/// 更新商品
///
/// 字段整体替换，图片先清空再按请求重建；两步在同一事务内完成。
pub async fn update_product(
    State(state): State<AppState>,
    Path(path): Path<ProductPath>,
    headers: HeaderMap,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Update);
    let (scope, req) =
        match require_mutation(&state, &headers, &path.store_id, KIND, body, &tag).await {
            Ok(value) => value,
            Err(response) => return response,
        };
    let refs = match check_references(&state, &scope.store_id, &req).await {
        Ok(refs) => refs,
        Err(err) => return gate_error(&tag, err),
    };
    let update = ProductUpdate {
        name: take_text(req.name),
        price: req.price.unwrap_or_default(),
        category_id: take_text(req.category_id),
        size_id: take_text(req.size_id),
        color_id: take_text(req.color_id),
        is_featured: req.is_featured.unwrap_or(false),
        is_archived: req.is_archived.unwrap_or(false),
        image_urls: take_image_urls(req.images),
    };
    match state
        .product_store
        .update_product(&scope, &path.product_id, update)
        .await
    {
        Ok(Some(product)) => ok(product_to_dto(product, refs)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}

/// 删除商品及其图片，返回被删除的商品
pub async fn delete_product(
    State(state): State<AppState>,
    Path(path): Path<ProductPath>,
    headers: HeaderMap,
) -> Response {
    let tag = KIND.log_tag(Operation::Delete);
    let scope = match require_store_scope(&state, &headers, &path.store_id, &tag).await {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    match state
        .product_store
        .delete_product(&scope, &path.product_id)
        .await
    {
        Ok(Some(product)) => ok(product_to_dto(product, ProductRefs::default())),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}
