//! 分类 CRUD handlers
//!
//! 提供分类资源的增删改查接口：
//! - GET /stores/{id}/categories - 列出分类（公开读）
//! - POST /stores/{id}/categories - 创建分类
//! - GET /stores/{id}/categories/{cid} - 获取分类详情（公开读）
//! - PATCH /stores/{id}/categories/{cid} - 更新分类
//! - DELETE /stores/{id}/categories/{cid} - 删除分类
//!
//! 创建/更新时 billboardId 必须指向同一店铺的广告牌。

use crate::AppState;
use crate::handlers::StorePath;
use crate::middleware::{require_mutation, require_store_scope};
use crate::utils::{
    category_to_dto, gate_error, not_found_error, ok, same_store_reference, storage_error,
    take_text,
};
use api_contract::{CategoryDto, CategoryRequest};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
    response::Response,
};
use catalog_gate::ensure_exists;
use catalog_storage::{CategoryRecord, CategoryUpdate, now_epoch_ms};
use domain::{Operation, ResourceKind};
use uuid::Uuid;

const KIND: ResourceKind = ResourceKind::Category;

#[derive(serde::Deserialize)]
pub struct CategoryPath {
    pub store_id: String,
    pub category_id: String,
}

/// 列出店铺下的分类
pub async fn list_categories(
    State(state): State<AppState>,
    Path(path): Path<StorePath>,
) -> Response {
    let tag = KIND.log_tag(Operation::List);
    match state.category_store.list(&path.store_id).await {
        Ok(items) => {
            let data: Vec<CategoryDto> = items.into_iter().map(category_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(&tag, err),
    }
}

/// 创建分类
pub async fn create_category(
    State(state): State<AppState>,
    Path(path): Path<StorePath>,
    headers: HeaderMap,
    body: Result<Json<CategoryRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Create);
    let (scope, req) =
        match require_mutation(&state, &headers, &path.store_id, KIND, body, &tag).await {
            Ok(value) => value,
            Err(response) => return response,
        };
    let billboard_id = take_text(req.billboard_id);
    if let Err(err) = same_store_reference(
        state.billboard_store.as_ref(),
        &scope.store_id,
        &billboard_id,
        "billboardId",
    )
    .await
    {
        return gate_error(&tag, err);
    }
    let now_ms = now_epoch_ms();
    let record = CategoryRecord {
        category_id: Uuid::new_v4().to_string(),
        store_id: scope.store_id.clone(),
        billboard_id,
        name: take_text(req.name),
        created_at_ms: now_ms,
        updated_at_ms: now_ms,
    };
    match state.category_store.create(&scope, record).await {
        Ok(item) => ok(category_to_dto(item)),
        Err(err) => storage_error(&tag, err),
    }
}

/// 获取分类详情
pub async fn get_category(
    State(state): State<AppState>,
    Path(path): Path<CategoryPath>,
) -> Response {
    let tag = KIND.log_tag(Operation::Get);
    let found = match state.category_store.find(&path.category_id).await {
        Ok(found) => found.filter(|item| item.store_id == path.store_id),
        Err(err) => return storage_error(&tag, err),
    };
    match ensure_exists(found, KIND) {
        Ok(item) => ok(category_to_dto(item)),
        Err(err) => gate_error(&tag, err),
    }
}

/// 更新分类
pub async fn update_category(
    State(state): State<AppState>,
    Path(path): Path<CategoryPath>,
    headers: HeaderMap,
    body: Result<Json<CategoryRequest>, JsonRejection>,
) -> Response {
    let tag = KIND.log_tag(Operation::Update);
    let (scope, req) =
        match require_mutation(&state, &headers, &path.store_id, KIND, body, &tag).await {
            Ok(value) => value,
            Err(response) => return response,
        };
    let billboard_id = take_text(req.billboard_id);
    if let Err(err) = same_store_reference(
        state.billboard_store.as_ref(),
        &scope.store_id,
        &billboard_id,
        "billboardId",
    )
    .await
    {
        return gate_error(&tag, err);
    }
    let update = CategoryUpdate {
        name: take_text(req.name),
        billboard_id,
    };
    match state
        .category_store
        .update(&scope, &path.category_id, update)
        .await
    {
        Ok(Some(item)) => ok(category_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}

/// 删除分类，返回被删除的记录
pub async fn delete_category(
    State(state): State<AppState>,
    Path(path): Path<CategoryPath>,
    headers: HeaderMap,
) -> Response {
    let tag = KIND.log_tag(Operation::Delete);
    let scope = match require_store_scope(&state, &headers, &path.store_id, &tag).await {
        Ok(scope) => scope,
        Err(response) => return response,
    };
    match state.category_store.delete(&scope, &path.category_id).await {
        Ok(Some(item)) => ok(category_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(&tag, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{auth_headers, read_json, seeded_state};
    use axum::http::StatusCode;
    use catalog_storage::CatalogStore;

    fn store_path(store_id: &str) -> Path<StorePath> {
        Path(StorePath {
            store_id: store_id.to_string(),
        })
    }

    fn category_path(store_id: &str, category_id: &str) -> Path<CategoryPath> {
        Path(CategoryPath {
            store_id: store_id.to_string(),
            category_id: category_id.to_string(),
        })
    }

    fn request(name: &str, billboard_id: &str) -> Result<Json<CategoryRequest>, JsonRejection> {
        Ok(Json(CategoryRequest {
            name: Some(name.to_string()),
            billboard_id: Some(billboard_id.to_string()),
        }))
    }

    #[tokio::test]
    async fn owner_creates_category() {
        let (state, _) = seeded_state().await;
        let response = create_category(
            State(state),
            store_path("store-1"),
            auth_headers("user-1"),
            request("Shoes", "b1"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["name"], "Shoes");
        assert_eq!(body["data"]["billboardId"], "b1");
        let category_id = body["data"]["categoryId"].as_str().unwrap_or_default();
        assert!(!category_id.is_empty());
        assert_ne!(category_id, "c1");
    }

    #[tokio::test]
    async fn stranger_update_is_forbidden_and_unchanged() {
        let (state, catalog) = seeded_state().await;
        let response = update_category(
            State(state),
            category_path("store-1", "c1"),
            auth_headers("user-2"),
            request("Boots", "b1"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "AUTH.FORBIDDEN");

        let kept: Option<CategoryRecord> = catalog.find("c1").await.expect("find");
        assert_eq!(kept.expect("exists").name, "Shoes");
    }

    #[tokio::test]
    async fn billboard_from_other_store_is_invalid() {
        let (state, _) = seeded_state().await;
        let response = create_category(
            State(state),
            store_path("store-1"),
            auth_headers("user-1"),
            request("Boots", "b2"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["message"], "billboardId is invalid");
    }

    #[tokio::test]
    async fn missing_billboard_id_is_required() {
        let (state, _) = seeded_state().await;
        let response = create_category(
            State(state),
            store_path("store-1"),
            auth_headers("user-1"),
            Ok(Json(CategoryRequest {
                name: Some("Boots".to_string()),
                billboard_id: None,
            })),
        )
        .await;
        let body = read_json(response).await;
        assert_eq!(body["error"]["message"], "billboardId is required");
    }

    #[tokio::test]
    async fn owner_updates_and_deletes_category() {
        let (state, _) = seeded_state().await;
        let response = update_category(
            State(state.clone()),
            category_path("store-1", "c1"),
            auth_headers("user-1"),
            request("Boots", "b1"),
        )
        .await;
        let body = read_json(response).await;
        assert_eq!(body["data"]["name"], "Boots");

        let response = delete_category(
            State(state.clone()),
            category_path("store-1", "c1"),
            auth_headers("user-1"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["categoryId"], "c1");

        let response = get_category(State(state), category_path("store-1", "c1")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
