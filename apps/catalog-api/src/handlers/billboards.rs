//! 广告牌 CRUD handlers
//!
//! 提供广告牌资源的增删改查接口：
//! - GET /stores/{id}/billboards - 列出广告牌（公开读）
//! - POST /stores/{id}/billboards - 创建广告牌
//! - GET /stores/{id}/billboards/{bid} - 获取广告牌详情（公开读）
//! - PATCH /stores/{id}/billboards/{bid} - 更新广告牌
//! - DELETE /stores/{id}/billboards/{bid} - 删除广告牌
//!
//! 权限要求：
//! - 写接口需要 Bearer token 认证，且店铺归属调用方
//! - 必填字段：label、imageUrl

use crate::AppState;
use crate::handlers::StorePath;
use crate::middleware::{require_mutation, require_store_scope};
use crate::utils::{billboard_to_dto, gate_error, not_found_error, ok, storage_error, take_text};
use api_contract::{BillboardDto, BillboardRequest};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
    response::Response,
};
use catalog_gate::ensure_exists;
use catalog_storage::{BillboardRecord, BillboardUpdate, now_epoch_ms};
use domain::{Operation, ResourceKind};
use uuid::Uuid;

const KIND: ResourceKind = ResourceKind::Billboard;

#[derive(serde::Deserialize)]
pub struct BillboardPath {
    pub store_id: String,
    pub billboard_id: String,
}

/// 列出店铺下的广告牌
pub async fn list_billboards(
    State(state): State<AppState>,
    Path(path): Path<StorePath>,
) -> Response {
    let tag = KIND.log_tag(Operation::List);
    match state.billboard_store.list(&path.store_id).await {
        Ok(items) => {
            let data: Vec<BillboardDto> = items.into_iter().map(billboard_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(&tag, err),
    }
}

/// 创建广告牌
///
/// # 流程
///
/// 1. 闸门校验：身份 → 店铺归属 → 必填字段（label、imageUrl）
/// 2. 生成新的广告牌 ID（UUID v4）
/// 3. 在作用域店铺下保存并返回
///
/// # 错误处理
///
/// - `401`: 无法解析调用方身份
/// - `403`: 店铺不存在或不属于调用方
/// - `400`: 必填字段缺失
/// - `500`: 存储层错误（日志标签 `BILLBOARDS_POST`）
pub async fn create_billboard(
    State(state): State<AppState>,
    Path(path): Path<StorePath>,
    headers: HeaderMap,
    body: Result<Json<BillboardRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Create);
    let (scope, req) =
        match require_mutation(&state, &headers, &path.store_id, KIND, body, &tag).await {
            Ok(value) => value,
            Err(response) => return response,
        };
    let now_ms = now_epoch_ms();
    let record = BillboardRecord {
        billboard_id: Uuid::new_v4().to_string(),
        store_id: scope.store_id.clone(),
        label: take_text(req.label),
        image_url: take_text(req.image_url),
        created_at_ms: now_ms,
        updated_at_ms: now_ms,
    };
    match state.billboard_store.create(&scope, record).await {
        Ok(item) => ok(billboard_to_dto(item)),
        Err(err) => storage_error(&tag, err),
    }
}

/// 获取广告牌详情（不属于路径店铺时视为不存在）
pub async fn get_billboard(
    State(state): State<AppState>,
    Path(path): Path<BillboardPath>,
) -> Response {
    let tag = KIND.log_tag(Operation::Get);
    let found = match state.billboard_store.find(&path.billboard_id).await {
        Ok(found) => found.filter(|item| item.store_id == path.store_id),
        Err(err) => return storage_error(&tag, err),
    };
    match ensure_exists(found, KIND) {
        Ok(item) => ok(billboard_to_dto(item)),
        Err(err) => gate_error(&tag, err),
    }
}

/// 更新广告牌（按广告牌 ID + store_id 过滤）
pub async fn update_billboard(
    State(state): State<AppState>,
    Path(path): Path<BillboardPath>,
    headers: HeaderMap,
    body: Result<Json<BillboardRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Update);
    let (scope, req) =
        match require_mutation(&state, &headers, &path.store_id, KIND, body, &tag).await {
            Ok(value) => value,
            Err(response) => return response,
        };
    let update = BillboardUpdate {
        label: take_text(req.label),
        image_url: take_text(req.image_url),
    };
    match state
        .billboard_store
        .update(&scope, &path.billboard_id, update)
        .await
    {
        Ok(Some(item)) => ok(billboard_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}

/// 删除广告牌，返回被删除的记录
///
/// 仍被分类引用时删除失败（内部错误）。
pub async fn delete_billboard(
    State(state): State<AppState>,
    Path(path): Path<BillboardPath>,
    headers: HeaderMap,
) -> Response {
    let tag = KIND.log_tag(Operation::Delete);
    let scope = match require_store_scope(&state, &headers, &path.store_id, &tag).await {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    match state
        .billboard_store
        .delete(&scope, &path.billboard_id)
        .await
    {
        Ok(Some(item)) => ok(billboard_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}
