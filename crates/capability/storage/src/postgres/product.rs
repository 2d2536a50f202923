//! Postgres 商品存储实现
//!
//! 商品与图片分表存储。创建、更新、删除均在单个事务内完成，
//! 更新时先删除旧图片再插入新图片，任一步失败整体回滚。

use crate::error::StorageError;
use crate::models::{
    ImageRecord, ProductFilter, ProductRecord, ProductUpdate, build_images, now_epoch_ms,
};
use crate::traits::ProductStore;
use crate::validation::{ensure_in_scope, ensure_scope};
use domain::StoreScope;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use std::collections::HashMap;

const PRODUCT_COLUMNS: &str = "product_id, store_id, category_id, size_id, color_id, name, price, \
     is_featured, is_archived, created_at_ms, updated_at_ms";

pub struct PgProductStore {
    pub pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 解码商品行（图片单独加载）。
fn product_from_row(row: &PgRow) -> Result<ProductRecord, sqlx::Error> {
    Ok(ProductRecord {
        product_id: row.try_get("product_id")?,
        store_id: row.try_get("store_id")?,
        category_id: row.try_get("category_id")?,
        size_id: row.try_get("size_id")?,
        color_id: row.try_get("color_id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        is_featured: row.try_get("is_featured")?,
        is_archived: row.try_get("is_archived")?,
        images: Vec::new(),
        created_at_ms: row.try_get("created_at_ms")?,
        updated_at_ms: row.try_get("updated_at_ms")?,
    })
}

fn image_from_row(row: &PgRow) -> Result<ImageRecord, sqlx::Error> {
    Ok(ImageRecord {
        image_id: row.try_get("image_id")?,
        product_id: row.try_get("product_id")?,
        url: row.try_get("url")?,
        created_at_ms: row.try_get("created_at_ms")?,
    })
}

async fn load_images(
    conn: &mut PgConnection,
    product_ids: &[String],
) -> Result<HashMap<String, Vec<ImageRecord>>, StorageError> {
    let mut grouped: HashMap<String, Vec<ImageRecord>> = HashMap::new();
    if product_ids.is_empty() {
        return Ok(grouped);
    }
    let rows = sqlx::query(
        "select image_id, product_id, url, created_at_ms from images \
         where product_id = any($1) order by created_at_ms, image_id",
    )
    .bind(product_ids)
    .fetch_all(&mut *conn)
    .await?;
    for row in rows {
        let image = image_from_row(&row)?;
        grouped
            .entry(image.product_id.clone())
            .or_default()
            .push(image);
    }
    Ok(grouped)
}

async fn insert_images(
    conn: &mut PgConnection,
    images: &[ImageRecord],
) -> Result<(), StorageError> {
    for image in images {
        sqlx::query(
            "insert into images (image_id, product_id, url, created_at_ms) values ($1, $2, $3, $4)",
        )
        .bind(&image.image_id)
        .bind(&image.product_id)
        .bind(&image.url)
        .bind(image.created_at_ms)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl ProductStore for PgProductStore {
    async fn list_products(
        &self,
        store_id: &str,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let sql = format!(
            "select {PRODUCT_COLUMNS} from products \
             where store_id = $1 \
               and is_archived = false \
               and ($2::text is null or category_id = $2) \
               and ($3::text is null or color_id = $3) \
               and ($4::text is null or size_id = $4) \
               and ($5 = false or is_featured) \
             order by created_at_ms desc, product_id"
        );
        let rows = sqlx::query(&sql)
            .bind(store_id)
            .bind(filter.category_id.as_deref())
            .bind(filter.color_id.as_deref())
            .bind(filter.size_id.as_deref())
            .bind(filter.featured_only)
            .fetch_all(&mut *conn)
            .await?;
        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            products.push(product_from_row(&row)?);
        }
        let ids: Vec<String> = products
            .iter()
            .map(|product| product.product_id.clone())
            .collect();
        let mut images = load_images(&mut conn, &ids).await?;
        for product in &mut products {
            product.images = images.remove(&product.product_id).unwrap_or_default();
        }
        Ok(products)
    }

    async fn find_product(&self, product_id: &str) -> Result<Option<ProductRecord>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let sql = format!("select {PRODUCT_COLUMNS} from products where product_id = $1");
        let row = sqlx::query(&sql)
            .bind(product_id)
            .fetch_optional(&mut *conn)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut product = product_from_row(&row)?;
        let mut images = load_images(&mut conn, std::slice::from_ref(&product.product_id)).await?;
        product.images = images.remove(&product.product_id).unwrap_or_default();
        Ok(Some(product))
    }

    async fn create_product(
        &self,
        scope: &StoreScope,
        record: ProductRecord,
    ) -> Result<ProductRecord, StorageError> {
        ensure_in_scope(scope, &record.store_id)?;
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "insert into products (product_id, store_id, category_id, size_id, color_id, name, \
             price, is_featured, is_archived, created_at_ms, updated_at_ms) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&record.product_id)
        .bind(&record.store_id)
        .bind(&record.category_id)
        .bind(&record.size_id)
        .bind(&record.color_id)
        .bind(&record.name)
        .bind(record.price)
        .bind(record.is_featured)
        .bind(record.is_archived)
        .bind(record.created_at_ms)
        .bind(record.updated_at_ms)
        .execute(&mut *tx)
        .await?;
        insert_images(&mut tx, &record.images).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn update_product(
        &self,
        scope: &StoreScope,
        product_id: &str,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, StorageError> {
        ensure_scope(scope)?;
        let now_ms = now_epoch_ms();
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "update products set name = $1, price = $2, category_id = $3, size_id = $4, \
             color_id = $5, is_featured = $6, is_archived = $7, updated_at_ms = $8 \
             where product_id = $9 and store_id = $10 \
             returning {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&update.name)
            .bind(update.price)
            .bind(&update.category_id)
            .bind(&update.size_id)
            .bind(&update.color_id)
            .bind(update.is_featured)
            .bind(update.is_archived)
            .bind(now_ms)
            .bind(product_id)
            .bind(&scope.store_id)
            .fetch_optional(&mut *tx)
            .await?;
        // 未命中时事务随 drop 回滚
        let Some(row) = row else {
            return Ok(None);
        };
        let mut product = product_from_row(&row)?;

        sqlx::query("delete from images where product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
        let images = build_images(product_id, &update.image_urls, now_ms);
        insert_images(&mut tx, &images).await?;

        tx.commit().await?;
        product.images = images;
        Ok(Some(product))
    }

    async fn delete_product(
        &self,
        scope: &StoreScope,
        product_id: &str,
    ) -> Result<Option<ProductRecord>, StorageError> {
        ensure_scope(scope)?;
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "select {PRODUCT_COLUMNS} from products \
             where product_id = $1 and store_id = $2 for update"
        );
        let row = sqlx::query(&sql)
            .bind(product_id)
            .bind(&scope.store_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut product = product_from_row(&row)?;
        let mut images = load_images(&mut tx, std::slice::from_ref(&product.product_id)).await?;
        product.images = images.remove(&product.product_id).unwrap_or_default();

        sqlx::query("delete from images where product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("delete from products where product_id = $1 and store_id = $2")
            .bind(product_id)
            .bind(&scope.store_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(product))
    }
}
