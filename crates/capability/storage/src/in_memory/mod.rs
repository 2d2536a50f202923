//! 内存存储实现模块
//!
//! 用于本地演示和测试（未配置数据库 URL 时也作为服务后端）。
//!
//! 所有表放在同一把 `RwLock` 内，因此：
//! - 删除店铺可原子地级联删除其全部资源
//! - 商品更新在一次写锁内完成字段更新与图片重建
//!
//! 包含以下实现：
//! - StoreStore: store.rs
//! - CatalogStore<R>: catalog.rs（广告牌、分类、尺码、颜色）
//! - ProductStore: product.rs

pub mod catalog;
pub mod product;
pub mod store;

use crate::error::StorageError;
use crate::models::{
    BillboardRecord, CategoryRecord, ColorRecord, ProductRecord, SizeRecord, StoreRecord,
};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 内存中的全部目录表。
#[derive(Debug, Default)]
pub struct CatalogTables {
    pub stores: HashMap<String, StoreRecord>,
    pub billboards: HashMap<String, BillboardRecord>,
    pub categories: HashMap<String, CategoryRecord>,
    pub sizes: HashMap<String, SizeRecord>,
    pub colors: HashMap<String, ColorRecord>,
    pub products: HashMap<String, ProductRecord>,
}

/// 目录内存存储
///
/// 同一个实例同时实现 StoreStore、CatalogStore<R> 与 ProductStore。
pub struct InMemoryCatalog {
    tables: RwLock<CatalogTables>,
}

impl InMemoryCatalog {
    /// 创建空存储
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(CatalogTables::default()),
        }
    }

    /// 内置默认店铺（store-1，所有者 user-1）
    pub fn with_default_store() -> Self {
        let catalog = Self::new();
        if let Ok(mut tables) = catalog.tables.write() {
            tables.stores.insert(
                "store-1".to_string(),
                StoreRecord {
                    store_id: "store-1".to_string(),
                    user_id: "user-1".to_string(),
                    name: "Default Store".to_string(),
                    created_at_ms: 0,
                    updated_at_ms: 0,
                },
            );
        }
        catalog
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogTables>, StorageError> {
        self.tables
            .read()
            .map_err(|_| StorageError::new("lock failed"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogTables>, StorageError> {
        self.tables
            .write()
            .map_err(|_| StorageError::new("lock failed"))
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// 按创建时间倒序排列（时间相同按 ID 排序，保证结果稳定）。
pub(crate) fn sort_newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (i64, &str)) {
    items.sort_by(|left, right| {
        let (left_ts, left_id) = key(left);
        let (right_ts, right_id) = key(right);
        right_ts.cmp(&left_ts).then_with(|| left_id.cmp(right_id))
    });
}
