//! handler 测试共用的状态与请求构造

use crate::AppState;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::Response;
use catalog_auth::{JwtIdentityResolver, JwtManager};
use catalog_storage::{
    BillboardRecord, CatalogStore, CategoryRecord, ColorRecord, InMemoryCatalog, SizeRecord,
    StoreRecord, StoreStore,
};
use domain::{CallerIdentity, StoreScope};
use std::sync::Arc;

const SECRET: &str = "test-secret";

fn jwt() -> JwtManager {
    JwtManager::new(SECRET.to_string(), 3600)
}

/// 带 Bearer token 的请求头
pub fn auth_headers(user_id: &str) -> HeaderMap {
    let identity = CallerIdentity::new(user_id).expect("identity");
    let token = jwt().issue_access_token(&identity).expect("token");
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("header"),
    );
    headers
}

/// 读取响应体 JSON
pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

/// 两个店铺：store-1 属于 user-1（b1/c1/s1/k1），store-2 属于 user-2（b2/c2/s2/k2）。
pub async fn seeded_state() -> (AppState, Arc<InMemoryCatalog>) {
    let catalog = Arc::new(InMemoryCatalog::with_default_store());
    seed(&catalog).await;
    let state = AppState::in_memory(
        Arc::new(JwtIdentityResolver::new(jwt())),
        catalog.clone(),
    );
    (state, catalog)
}

async fn seed(catalog: &InMemoryCatalog) {
    let owner = CallerIdentity::new("user-2").expect("identity");
    catalog
        .create_store(
            &owner,
            StoreRecord {
                store_id: "store-2".to_string(),
                user_id: "user-2".to_string(),
                name: "Other Store".to_string(),
                created_at_ms: 1,
                updated_at_ms: 1,
            },
        )
        .await
        .expect("store-2");

    for (store_id, user_id, suffix) in [("store-1", "user-1", "1"), ("store-2", "user-2", "2")] {
        let scope = StoreScope::new(user_id, store_id);
        catalog
            .create(
                &scope,
                BillboardRecord {
                    billboard_id: format!("b{suffix}"),
                    store_id: store_id.to_string(),
                    label: "Summer".to_string(),
                    image_url: "https://cdn.example.com/summer.png".to_string(),
                    created_at_ms: 1,
                    updated_at_ms: 1,
                },
            )
            .await
            .expect("billboard");
        catalog
            .create(
                &scope,
                CategoryRecord {
                    category_id: format!("c{suffix}"),
                    store_id: store_id.to_string(),
                    billboard_id: format!("b{suffix}"),
                    name: "Shoes".to_string(),
                    created_at_ms: 1,
                    updated_at_ms: 1,
                },
            )
            .await
            .expect("category");
        catalog
            .create(
                &scope,
                SizeRecord {
                    size_id: format!("s{suffix}"),
                    store_id: store_id.to_string(),
                    name: "Large".to_string(),
                    value: "L".to_string(),
                    created_at_ms: 1,
                    updated_at_ms: 1,
                },
            )
            .await
            .expect("size");
        catalog
            .create(
                &scope,
                ColorRecord {
                    color_id: format!("k{suffix}"),
                    store_id: store_id.to_string(),
                    name: "Black".to_string(),
                    value: "#000000".to_string(),
                    created_at_ms: 1,
                    updated_at_ms: 1,
                },
            )
            .await
            .expect("color");
    }
}
