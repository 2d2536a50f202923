//! 颜色 CRUD handlers
//!
//! - GET /stores/{id}/colors - 列出颜色（公开读）
//! - POST /stores/{id}/colors - 创建颜色
//! - GET /stores/{id}/colors/{cid} - 获取颜色详情（公开读）
//! - PATCH /stores/{id}/colors/{cid} - 更新颜色
//! - DELETE /stores/{id}/colors/{cid} - 删除颜色
//!
//! 必填字段：name、value（通常为十六进制色值）

use crate::AppState;
use crate::handlers::StorePath;
use crate::middleware::{require_mutation, require_store_scope};
use crate::utils::{color_to_dto, gate_error, not_found_error, ok, storage_error, take_text};
use api_contract::{ColorDto, NamedValueRequest};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
    response::Response,
};
use catalog_gate::ensure_exists;
use catalog_storage::{ColorRecord, NamedValueUpdate, now_epoch_ms};
use domain::{Operation, ResourceKind};
use uuid::Uuid;

const KIND: ResourceKind = ResourceKind::Color;

#[derive(serde::Deserialize)]
pub struct ColorPath {
    pub store_id: String,
    pub color_id: String,
}

pub async fn list_colors(State(state): State<AppState>, Path(path): Path<StorePath>) -> Response {
    let tag = KIND.log_tag(Operation::List);
    match state.color_store.list(&path.store_id).await {
        Ok(items) => {
            let data: Vec<ColorDto> = items.into_iter().map(color_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(&tag, err),
    }
}

pub async fn create_color(
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
    let record = ColorRecord {
        color_id: Uuid::new_v4().to_string(),
        store_id: scope.store_id.clone(),
        name: take_text(req.name),
        value: take_text(req.value),
        created_at_ms: now_ms,
        updated_at_ms: now_ms,
    };
    match state.color_store.create(&scope, record).await {
        Ok(item) => ok(color_to_dto(item)),
        Err(err) => storage_error(&tag, err),
    }
}

pub async fn get_color(State(state): State<AppState>, Path(path): Path<ColorPath>) -> Response {
    let tag = KIND.log_tag(Operation::Get);
    let found = match state.color_store.find(&path.color_id).await {
        Ok(found) => found.filter(|item| item.store_id == path.store_id),
        Err(err) => return storage_error(&tag, err),
    };
    match ensure_exists(found, KIND) {
        Ok(item) => ok(color_to_dto(item)),
        Err(err) => gate_error(&tag, err),
    }
}

pub async fn update_color(
    State(state): State<AppState>,
    Path(path): Path<ColorPath>,
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
    match state.color_store.update(&scope, &path.color_id, update).await {
        Ok(Some(item)) => ok(color_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}

pub async fn delete_color(
    State(state): State<AppState>,
    Path(path): Path<ColorPath>,
    headers: HeaderMap,
) -> Response {
    let tag = KIND.log_tag(Operation::Delete);
    let scope = match require_store_scope(&state, &headers, &path.store_id, &tag).await {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    match state.color_store.delete(&scope, &path.color_id).await {
        Ok(Some(item)) => ok(color_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}
