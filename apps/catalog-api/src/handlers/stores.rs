//! 店铺 CRUD handlers
//!
//! 提供店铺资源的增删改查接口：
//! - GET /stores - 列出调用方拥有的店铺
//! - POST /stores - 创建店铺（所有者为调用方）
//! - GET /stores/{id} - 获取店铺详情（公开读）
//! - PATCH /stores/{id} - 更新店铺名称
//! - DELETE /stores/{id} - 删除店铺及其全部资源
//!
//! 权限要求：
//! - 写接口需要 Bearer token 认证
//! - 更新/删除需验证店铺归属调用方

use crate::AppState;
use crate::middleware::{
    require_identity, require_mutation, require_store_creation, require_store_scope,
};
use crate::utils::{gate_error, not_found_error, ok, storage_error, store_to_dto, take_text};
use api_contract::{StoreDto, StoreRequest};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
    response::Response,
};
use catalog_gate::ensure_exists;
use catalog_storage::{StoreRecord, StoreUpdate, now_epoch_ms};
use domain::{Operation, ResourceKind};
use uuid::Uuid;

const KIND: ResourceKind = ResourceKind::Store;

#[derive(serde::Deserialize)]
pub struct StorePath {
    pub store_id: String,
}

/// 列出调用方拥有的店铺
pub async fn list_stores(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let tag = KIND.log_tag(Operation::List);
    let caller = match require_identity(&state, &headers, &tag) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    match state.store_store.list_stores(&caller).await {
        Ok(stores) => {
            let data: Vec<StoreDto> = stores.into_iter().map(store_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(&tag, err),
    }
}

/// 创建店铺
///
/// # 流程
///
/// 1. 解析调用方身份并校验 `name` 必填
/// 2. 生成新的店铺 ID（UUID v4），所有者写入调用方 user_id
/// 3. 保存并返回新店铺
pub async fn create_store(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<StoreRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Create);
    let (caller, req) = match require_store_creation(&state, &headers, body, &tag) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let now_ms = now_epoch_ms();
    let record = StoreRecord {
        store_id: Uuid::new_v4().to_string(),
        user_id: caller.user_id().to_string(),
        name: take_text(req.name),
        created_at_ms: now_ms,
        updated_at_ms: now_ms,
    };
    match state.store_store.create_store(&caller, record).await {
        Ok(store) => ok(store_to_dto(store)),
        Err(err) => storage_error(&tag, err),
    }
}

/// 获取店铺详情
pub async fn get_store(State(state): State<AppState>, Path(path): Path<StorePath>) -> Response {
    let tag = KIND.log_tag(Operation::Get);
    match state.store_store.find_store(&path.store_id).await {
        Ok(found) => match ensure_exists(found, KIND) {
            Ok(store) => ok(store_to_dto(store)),
            Err(err) => gate_error(&tag, err),
        },
        Err(err) => storage_error(&tag, err),
    }
}

/// 更新店铺名称（按 store_id + user_id 过滤）
pub async fn update_store(
    State(state): State<AppState>,
    Path(path): Path<StorePath>,
    headers: HeaderMap,
    body: Result<Json<StoreRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Update);
    let (scope, req) =
        match require_mutation(&state, &headers, &path.store_id, KIND, body, &tag).await {
            Ok(value) => value,
            Err(response) => return response,
        };
    let update = StoreUpdate {
        name: take_text(req.name),
    };
    match state.store_store.update_store(&scope, update).await {
        Ok(Some(store)) => ok(store_to_dto(store)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}

/// 删除店铺（级联删除全部资源），返回被删除的店铺
pub async fn delete_store(
    State(state): State<AppState>,
    Path(path): Path<StorePath>,
    headers: HeaderMap,
) -> Response {
    let tag = KIND.log_tag(Operation::Delete);
    let scope = match require_store_scope(&state, &headers, &path.store_id, &tag).await {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    match state.store_store.delete_store(&scope).await {
        Ok(Some(store)) => ok(store_to_dto(store)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}
