//! 应用状态
//!
//! 持有闸门与各资源存储的共享句柄，由 main 显式构造后注入路由。

use catalog_auth::IdentityResolver;
use catalog_gate::ResourceGate;
use catalog_storage::{
    BillboardRecord, CatalogStore, CategoryRecord, ColorRecord, InMemoryCatalog, PgCatalogStore,
    PgProductStore, PgStoreStore, ProductStore, SizeRecord, StoreStore,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gate: ResourceGate,
    /// 仅 Postgres 后端存在，停机时关闭
    pub db_pool: Option<PgPool>,
    pub store_store: Arc<dyn StoreStore>,
    pub billboard_store: Arc<dyn CatalogStore<BillboardRecord>>,
    pub category_store: Arc<dyn CatalogStore<CategoryRecord>>,
    pub size_store: Arc<dyn CatalogStore<SizeRecord>>,
    pub color_store: Arc<dyn CatalogStore<ColorRecord>>,
    pub product_store: Arc<dyn ProductStore>,
}

impl AppState {
    /// 内存后端：同一个 InMemoryCatalog 承担全部存储接口。
    pub fn in_memory(identity: Arc<dyn IdentityResolver>, catalog: Arc<InMemoryCatalog>) -> Self {
        let store_store: Arc<dyn StoreStore> = catalog.clone();
        Self {
            gate: ResourceGate::new(identity, store_store.clone()),
            db_pool: None,
            store_store,
            billboard_store: catalog.clone(),
            category_store: catalog.clone(),
            size_store: catalog.clone(),
            color_store: catalog.clone(),
            product_store: catalog,
        }
    }

    /// Postgres 后端：所有存储共享同一个连接池。
    pub fn postgres(identity: Arc<dyn IdentityResolver>, pool: PgPool) -> Self {
        let store_store: Arc<dyn StoreStore> = Arc::new(PgStoreStore::new(pool.clone()));
        Self {
            gate: ResourceGate::new(identity, store_store.clone()),
            db_pool: Some(pool.clone()),
            store_store,
            billboard_store: Arc::new(PgCatalogStore::<BillboardRecord>::new(pool.clone())),
            category_store: Arc::new(PgCatalogStore::<CategoryRecord>::new(pool.clone())),
            size_store: Arc::new(PgCatalogStore::<SizeRecord>::new(pool.clone())),
            color_store: Arc::new(PgCatalogStore::<ColorRecord>::new(pool.clone())),
            product_store: Arc::new(PgProductStore::new(pool)),
        }
    }
}
