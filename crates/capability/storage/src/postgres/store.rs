//! Postgres 店铺存储实现
//!
//! 设计要点：
//! - 归属查询在一条 SQL 内同时匹配 store_id 与 user_id
//! - 删除店铺按依赖顺序在事务内级联删除全部资源

use crate::error::StorageError;
use crate::models::{StoreRecord, StoreUpdate, now_epoch_ms};
use crate::traits::StoreStore;
use crate::validation::ensure_scope;
use domain::{CallerIdentity, StoreScope};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const STORE_COLUMNS: &str = "store_id, user_id, name, created_at_ms, updated_at_ms";

pub struct PgStoreStore {
    pub pool: PgPool,
}

impl PgStoreStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_from_row(row: &PgRow) -> Result<StoreRecord, sqlx::Error> {
    Ok(StoreRecord {
        store_id: row.try_get("store_id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        created_at_ms: row.try_get("created_at_ms")?,
        updated_at_ms: row.try_get("updated_at_ms")?,
    })
}

#[async_trait::async_trait]
impl StoreStore for PgStoreStore {
    async fn list_stores(&self, owner: &CallerIdentity) -> Result<Vec<StoreRecord>, StorageError> {
        let sql = format!(
            "select {STORE_COLUMNS} from stores where user_id = $1 \
             order by created_at_ms desc, store_id"
        );
        let rows = sqlx::query(&sql)
            .bind(owner.user_id())
            .fetch_all(&self.pool)
            .await?;
        let mut stores = Vec::with_capacity(rows.len());
        for row in rows {
            stores.push(store_from_row(&row)?);
        }
        Ok(stores)
    }

    async fn find_store(&self, store_id: &str) -> Result<Option<StoreRecord>, StorageError> {
        let sql = format!("select {STORE_COLUMNS} from stores where store_id = $1");
        let row = sqlx::query(&sql)
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(store_from_row(&row)?))
    }

    async fn find_owned_store(
        &self,
        owner: &CallerIdentity,
        store_id: &str,
    ) -> Result<Option<StoreRecord>, StorageError> {
        let sql =
            format!("select {STORE_COLUMNS} from stores where store_id = $1 and user_id = $2");
        let row = sqlx::query(&sql)
            .bind(store_id)
            .bind(owner.user_id())
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(store_from_row(&row)?))
    }

    async fn create_store(
        &self,
        owner: &CallerIdentity,
        record: StoreRecord,
    ) -> Result<StoreRecord, StorageError> {
        if record.user_id != owner.user_id() {
            return Err(StorageError::new("owner mismatch"));
        }
        sqlx::query(
            "insert into stores (store_id, user_id, name, created_at_ms, updated_at_ms) \
             values ($1, $2, $3, $4, $5)",
        )
        .bind(&record.store_id)
        .bind(&record.user_id)
        .bind(&record.name)
        .bind(record.created_at_ms)
        .bind(record.updated_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_store(
        &self,
        scope: &StoreScope,
        update: StoreUpdate,
    ) -> Result<Option<StoreRecord>, StorageError> {
        ensure_scope(scope)?;
        let sql = format!(
            "update stores set name = $1, updated_at_ms = $2 \
             where store_id = $3 and user_id = $4 \
             returning {STORE_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(update.name)
            .bind(now_epoch_ms())
            .bind(&scope.store_id)
            .bind(&scope.user_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(store_from_row(&row)?))
    }

    /// 删除店铺（级联删除所有关联资源）
    ///
    /// 删除顺序：
    /// 1. 商品图片 (images)
    /// 2. 商品 (products)
    /// 3. 分类 (categories)
    /// 4. 广告牌 (billboards)
    /// 5. 尺码、颜色 (sizes, colors)
    /// 6. 店铺 (stores)
    async fn delete_store(&self, scope: &StoreScope) -> Result<Option<StoreRecord>, StorageError> {
        ensure_scope(scope)?;
        let mut tx = self.pool.begin().await?;

        // 先锁定并确认归属，不属于调用方时不做任何删除
        let sql = format!(
            "select {STORE_COLUMNS} from stores where store_id = $1 and user_id = $2 for update"
        );
        let row = sqlx::query(&sql)
            .bind(&scope.store_id)
            .bind(&scope.user_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let store = store_from_row(&row)?;

        sqlx::query(
            "delete from images where product_id in \
             (select product_id from products where store_id = $1)",
        )
        .bind(&scope.store_id)
        .execute(&mut *tx)
        .await?;
        for table in ["products", "categories", "billboards", "sizes", "colors"] {
            let sql = format!("delete from {table} where store_id = $1");
            sqlx::query(&sql)
                .bind(&scope.store_id)
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query("delete from stores where store_id = $1 and user_id = $2")
            .bind(&scope.store_id)
            .bind(&scope.user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(store))
    }
}
