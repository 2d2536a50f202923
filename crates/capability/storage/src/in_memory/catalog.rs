//! 目录资源内存存储实现（广告牌、分类、尺码、颜色）
//!
//! 通过 `InMemoryTable` 把记录类型映射到对应的表，
//! 一份泛型实现覆盖四种资源。

use super::{CatalogTables, InMemoryCatalog, sort_newest_first};
use crate::error::StorageError;
use crate::models::{BillboardRecord, CategoryRecord, ColorRecord, SizeRecord, now_epoch_ms};
use crate::traits::{CatalogRecord, CatalogStore};
use crate::validation::{ensure_in_scope, ensure_scope};
use domain::StoreScope;
use std::collections::HashMap;

/// 记录类型到内存表的映射。
pub trait InMemoryTable: CatalogRecord {
    fn table(tables: &CatalogTables) -> &HashMap<String, Self>;
    fn table_mut(tables: &mut CatalogTables) -> &mut HashMap<String, Self>;

    /// 是否仍被其它记录引用（被引用时禁止删除，与数据库外键一致）。
    fn is_referenced(tables: &CatalogTables, id: &str) -> bool;

    /// 写入前校验本记录引用的记录存在且属于同一店铺。
    fn check_references(&self, _tables: &CatalogTables) -> Result<(), StorageError> {
        Ok(())
    }
}

/// 被引用记录必须存在且属于 `store_id`。
pub(crate) fn ensure_reference<R: CatalogRecord>(
    table: &HashMap<String, R>,
    id: &str,
    store_id: &str,
) -> Result<(), StorageError> {
    match table.get(id) {
        Some(item) if item.store_id() == store_id => Ok(()),
        _ => Err(StorageError::new(format!("{} reference invalid", R::KIND))),
    }
}

impl InMemoryTable for BillboardRecord {
    fn table(tables: &CatalogTables) -> &HashMap<String, Self> {
        &tables.billboards
    }

    fn table_mut(tables: &mut CatalogTables) -> &mut HashMap<String, Self> {
        &mut tables.billboards
    }

    fn is_referenced(tables: &CatalogTables, id: &str) -> bool {
        tables
            .categories
            .values()
            .any(|category| category.billboard_id == id)
    }
}

impl InMemoryTable for CategoryRecord {
    fn table(tables: &CatalogTables) -> &HashMap<String, Self> {
        &tables.categories
    }

    fn table_mut(tables: &mut CatalogTables) -> &mut HashMap<String, Self> {
        &mut tables.categories
    }

    fn is_referenced(tables: &CatalogTables, id: &str) -> bool {
        tables
            .products
            .values()
            .any(|product| product.category_id == id)
    }

    fn check_references(&self, tables: &CatalogTables) -> Result<(), StorageError> {
        ensure_reference(&tables.billboards, &self.billboard_id, &self.store_id)
    }
}

impl InMemoryTable for SizeRecord {
    fn table(tables: &CatalogTables) -> &HashMap<String, Self> {
        &tables.sizes
    }

    fn table_mut(tables: &mut CatalogTables) -> &mut HashMap<String, Self> {
        &mut tables.sizes
    }

    fn is_referenced(tables: &CatalogTables, id: &str) -> bool {
        tables.products.values().any(|product| product.size_id == id)
    }
}

impl InMemoryTable for ColorRecord {
    fn table(tables: &CatalogTables) -> &HashMap<String, Self> {
        &tables.colors
    }

    fn table_mut(tables: &mut CatalogTables) -> &mut HashMap<String, Self> {
        &mut tables.colors
    }

    fn is_referenced(tables: &CatalogTables, id: &str) -> bool {
        tables.products.values().any(|product| product.color_id == id)
    }
}

#[async_trait::async_trait]
impl<R> CatalogStore<R> for InMemoryCatalog
where
    R: InMemoryTable,
{
    async fn list(&self, store_id: &str) -> Result<Vec<R>, StorageError> {
        let tables = self.read()?;
        let mut items: Vec<R> = R::table(&tables)
            .values()
            .filter(|item| item.store_id() == store_id)
            .cloned()
            .collect();
        sort_newest_first(&mut items, |item| (item.created_at_ms(), item.id()));
        Ok(items)
    }

    async fn find(&self, id: &str) -> Result<Option<R>, StorageError> {
        let tables = self.read()?;
        Ok(R::table(&tables).get(id).cloned())
    }

    async fn create(&self, scope: &StoreScope, record: R) -> Result<R, StorageError> {
        ensure_in_scope(scope, record.store_id())?;
        let mut tables = self.write()?;
        if !tables.stores.contains_key(&scope.store_id) {
            return Err(StorageError::new("store missing"));
        }
        record.check_references(&tables)?;
        let table = R::table_mut(&mut tables);
        if table.contains_key(record.id()) {
            return Err(StorageError::new(format!("{} exists", R::KIND)));
        }
        table.insert(record.id().to_string(), record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        scope: &StoreScope,
        id: &str,
        update: R::Update,
    ) -> Result<Option<R>, StorageError> {
        ensure_scope(scope)?;
        let mut tables = self.write()?;
        let mut staged = match R::table(&tables).get(id) {
            Some(item) if item.store_id() == scope.store_id => item.clone(),
            _ => return Ok(None),
        };
        staged.apply_update(update, now_epoch_ms());
        staged.check_references(&tables)?;
        R::table_mut(&mut tables).insert(id.to_string(), staged.clone());
        Ok(Some(staged))
    }

    async fn delete(&self, scope: &StoreScope, id: &str) -> Result<Option<R>, StorageError> {
        ensure_scope(scope)?;
        let mut tables = self.write()?;
        match R::table(&tables).get(id) {
            Some(item) if item.store_id() == scope.store_id => {}
            _ => return Ok(None),
        }
        if R::is_referenced(&tables, id) {
            return Err(StorageError::new(format!("{} in use", R::KIND)));
        }
        Ok(R::table_mut(&mut tables).remove(id))
    }
}
