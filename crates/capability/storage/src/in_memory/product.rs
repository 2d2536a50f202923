//! 商品内存存储实现
//!
//! 更新在一次写锁内完成：先在副本上应用字段、清空并重建图片，
//! 全部成功后再整体替换原记录。任一步失败时原记录保持不变。

use super::catalog::ensure_reference;
use super::{CatalogTables, InMemoryCatalog, sort_newest_first};
use crate::error::StorageError;
use crate::models::{
    ImageRecord, ProductFilter, ProductRecord, ProductUpdate, build_images, now_epoch_ms,
};
use crate::traits::ProductStore;
use crate::validation::{ensure_in_scope, ensure_scope};
use domain::StoreScope;

/// 图片表的非空约束（与数据库 `url text not null check (url <> '')` 一致）。
fn insert_images(
    target: &mut Vec<ImageRecord>,
    images: Vec<ImageRecord>,
) -> Result<(), StorageError> {
    for image in images {
        if image.url.trim().is_empty() {
            return Err(StorageError::new("image url required"));
        }
        target.push(image);
    }
    Ok(())
}

/// 分类/尺码/颜色外键：必须存在且属于商品所在店铺。
fn check_product_references(
    tables: &CatalogTables,
    product: &ProductRecord,
) -> Result<(), StorageError> {
    ensure_reference(&tables.categories, &product.category_id, &product.store_id)?;
    ensure_reference(&tables.sizes, &product.size_id, &product.store_id)?;
    ensure_reference(&tables.colors, &product.color_id, &product.store_id)
}

#[async_trait::async_trait]
impl ProductStore for InMemoryCatalog {
    async fn list_products(
        &self,
        store_id: &str,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, StorageError> {
        let tables = self.read()?;
        let mut products: Vec<ProductRecord> = tables
            .products
            .values()
            .filter(|product| product.store_id == store_id && filter.matches(product))
            .cloned()
            .collect();
        sort_newest_first(&mut products, |product| {
            (product.created_at_ms, product.product_id.as_str())
        });
        Ok(products)
    }

    async fn find_product(&self, product_id: &str) -> Result<Option<ProductRecord>, StorageError> {
        let tables = self.read()?;
        Ok(tables.products.get(product_id).cloned())
    }

    async fn create_product(
        &self,
        scope: &StoreScope,
        record: ProductRecord,
    ) -> Result<ProductRecord, StorageError> {
        ensure_in_scope(scope, &record.store_id)?;
        let mut tables = self.write()?;
        if !tables.stores.contains_key(&scope.store_id) {
            return Err(StorageError::new("store missing"));
        }
        if tables.products.contains_key(&record.product_id) {
            return Err(StorageError::new("product exists"));
        }
        check_product_references(&tables, &record)?;
        let mut staged = ProductRecord {
            images: Vec::with_capacity(record.images.len()),
            ..record.clone()
        };
        insert_images(&mut staged.images, record.images)?;
        tables
            .products
            .insert(staged.product_id.clone(), staged.clone());
        Ok(staged)
    }

    async fn update_product(
        &self,
        scope: &StoreScope,
        product_id: &str,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, StorageError> {
        ensure_scope(scope)?;
        let mut tables = self.write()?;
        let mut staged = match tables.products.get(product_id) {
            Some(product) if product.store_id == scope.store_id => product.clone(),
            _ => return Ok(None),
        };

        let now_ms = now_epoch_ms();
        staged.name = update.name;
        staged.price = update.price;
        staged.category_id = update.category_id;
        staged.size_id = update.size_id;
        staged.color_id = update.color_id;
        staged.is_featured = update.is_featured;
        staged.is_archived = update.is_archived;
        staged.updated_at_ms = now_ms;
        staged.images.clear();
        let images = build_images(product_id, &update.image_urls, now_ms);
        insert_images(&mut staged.images, images)?;
        check_product_references(&tables, &staged)?;

        tables
            .products
            .insert(staged.product_id.clone(), staged.clone());
        Ok(Some(staged))
    }

    async fn delete_product(
        &self,
        scope: &StoreScope,
        product_id: &str,
    ) -> Result<Option<ProductRecord>, StorageError> {
        ensure_scope(scope)?;
        let mut tables = self.write()?;
        match tables.products.get(product_id) {
            Some(product) if product.store_id == scope.store_id => {}
            _ => return Ok(None),
        }
        Ok(tables.products.remove(product_id))
    }
}
