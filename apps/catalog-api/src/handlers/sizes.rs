//! 尺码 CRUD handlers
//!
//! - GET /stores/{id}/sizes - 列出尺码（公开读）
//! - POST /stores/{id}/sizes - 创建尺码
//! - GET /stores/{id}/sizes/{sid} - 获取尺码详情（公开读）
//! - PATCH /stores/{id}/sizes/{sid} - 更新尺码
//! - DELETE /stores/{id}/sizes/{sid} - 删除尺码
//!
//! 必填字段：name、value

use crate::AppState;
use crate::handlers::StorePath;
use crate::middleware::{require_mutation, require_store_scope};
use crate::utils::{gate_error, not_found_error, ok, size_to_dto, storage_error, take_text};
use api_contract::{NamedValueRequest, SizeDto};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
    response::Response,
};
use catalog_gate::ensure_exists;
use catalog_storage::{NamedValueUpdate, SizeRecord, now_epoch_ms};
use domain::{Operation, ResourceKind};
use uuid::Uuid;

const KIND: ResourceKind = ResourceKind::Size;

#[derive(serde::Deserialize)]
pub struct SizePath {
    pub store_id: String,
    pub size_id: String,
}

pub async fn list_sizes(State(state): State<AppState>, Path(path): Path<StorePath>) -> Response {
    let tag = KIND.log_tag(Operation::List);
    match state.size_store.list(&path.store_id).await {
        Ok(items) => {
            let data: Vec<SizeDto> = items.into_iter().map(size_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(&tag, err),
    }
}

pub async fn create_size(
    State(state): State<AppState>,
    Path(path): Path<StorePath>,
    headers: HeaderMap,
    body: Result<Json<NamedValueRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Create);
    let (scope, req) =
        match require_mutation(&state, &headers, &path.store_id, KIND, body, &tag).await {
            Ok(value) => value,
            Err(response) => return response,
        };
    let now_ms = now_epoch_ms();
    let record = SizeRecord {
        size_id: Uuid::new_v4().to_string(),
        store_id: scope.store_id.clone(),
        name: take_text(req.name),
        value: take_text(req.value),
        created_at_ms: now_ms,
        updated_at_ms: now_ms,
    };
    match state.size_store.create(&scope, record).await {
        Ok(item) => ok(size_to_dto(item)),
        Err(err) => storage_error(&tag, err),
    }
}

pub async fn get_size(State(state): State<AppState>, Path(path): Path<SizePath>) -> Response {
    let tag = KIND.log_tag(Operation::Get);
    let found = match state.size_store.find(&path.size_id).await {
        Ok(found) => found.filter(|item| item.store_id == path.store_id),
        Err(err) => return storage_error(&tag, err),
    };
    match ensure_exists(found, KIND) {
        Ok(item) => ok(size_to_dto(item)),
        Err(err) => gate_error(&tag, err),
    }
}

pub async fn update_size(
    State(state): State<AppState>,
    Path(path): Path<SizePath>,
    headers: HeaderMap,
    body: Result<Json<NamedValueRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Update);
    let (scope, req) =
        match require_mutation(&state, &headers, &path.store_id, KIND, body, &tag).await {
            Ok(value) => value,
            Err(response) => return response,
        };
    let update = NamedValueUpdate {
        name: take_text(req.name),
        value: take_text(req.value),
    };
    match state.size_store.update(&scope, &path.size_id, update).await {
        Ok(Some(item)) => ok(size_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}

/// 删除尺码；仍被商品引用时删除失败（内部错误）
pub async fn delete_size(
    State(state): State<AppState>,
    Path(path): Path<SizePath>,
    headers: HeaderMap,
) -> Response {
    let tag = KIND.log_tag(Operation::Delete);
    let scope = match require_store_scope(&state, &headers, &path.store_id, &tag).await {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    match state.size_store.delete(&scope, &path.size_id).await {
        Ok(Some(item)) => ok(size_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}
