//! Postgres 目录资源存储实现（广告牌、分类、尺码、颜色）
//!
//! 四张表结构相同：`<id>, store_id, <业务列...>, created_at_ms, updated_at_ms`。
//! `PgCatalogRecord` 提供表名、列名与绑定/解码逻辑，SQL 由常量拼接，值全部参数化。

use crate::error::StorageError;
use crate::models::{
    BillboardRecord, BillboardUpdate, CategoryRecord, CategoryUpdate, ColorRecord,
    NamedValueUpdate, SizeRecord, now_epoch_ms,
};
use crate::traits::{CatalogRecord, CatalogStore};
use crate::validation::{ensure_in_scope, ensure_scope};
use domain::StoreScope;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};
use std::marker::PhantomData;

pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// 记录类型到数据库表的映射。
pub trait PgCatalogRecord: CatalogRecord {
    const TABLE: &'static str;
    const ID_COLUMN: &'static str;
    /// 业务列，顺序与 `bind_columns` / `bind_update` 一致
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error>;
    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
    fn bind_update<'q>(update: &'q Self::Update, query: PgQuery<'q>) -> PgQuery<'q>;
}

fn select_columns<R: PgCatalogRecord>() -> String {
    format!(
        "{}, store_id, {}, created_at_ms, updated_at_ms",
        R::ID_COLUMN,
        R::COLUMNS.join(", ")
    )
}

fn insert_sql<R: PgCatalogRecord>() -> String {
    // id, store_id, 业务列..., created_at_ms, updated_at_ms
    let total = R::COLUMNS.len() + 4;
    let placeholders: Vec<String> = (1..=total).map(|index| format!("${index}")).collect();
    format!(
        "insert into {} ({}) values ({})",
        R::TABLE,
        select_columns::<R>(),
        placeholders.join(", ")
    )
}

fn update_sql<R: PgCatalogRecord>() -> String {
    let mut assignments: Vec<String> = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{column} = ${}", index + 1))
        .collect();
    let next = R::COLUMNS.len() + 1;
    assignments.push(format!("updated_at_ms = ${next}"));
    format!(
        "update {} set {} where {} = ${} and store_id = ${} returning {}",
        R::TABLE,
        assignments.join(", "),
        R::ID_COLUMN,
        next + 1,
        next + 2,
        select_columns::<R>()
    )
}

/// 目录资源 Postgres 存储
pub struct PgCatalogStore<R> {
    pub pool: PgPool,
    _record: PhantomData<fn() -> R>,
}

impl<R> PgCatalogStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<R> CatalogStore<R> for PgCatalogStore<R>
where
    R: PgCatalogRecord,
{
    async fn list(&self, store_id: &str) -> Result<Vec<R>, StorageError> {
        let sql = format!(
            "select {} from {} where store_id = $1 order by created_at_ms desc, {}",
            select_columns::<R>(),
            R::TABLE,
            R::ID_COLUMN
        );
        let rows = sqlx::query(&sql)
            .bind(store_id)
            .fetch_all(&self.pool)
            .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(R::from_row(&row)?);
        }
        Ok(items)
    }

    async fn find(&self, id: &str) -> Result<Option<R>, StorageError> {
        let sql = format!(
            "select {} from {} where {} = $1",
            select_columns::<R>(),
            R::TABLE,
            R::ID_COLUMN
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(R::from_row(&row)?))
    }

    async fn create(&self, scope: &StoreScope, record: R) -> Result<R, StorageError> {
        ensure_in_scope(scope, record.store_id())?;
        let sql = insert_sql::<R>();
        let query = sqlx::query(&sql).bind(record.id()).bind(record.store_id());
        record
            .bind_columns(query)
            .bind(record.created_at_ms())
            .bind(record.created_at_ms())
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn update(
        &self,
        scope: &StoreScope,
        id: &str,
        update: R::Update,
    ) -> Result<Option<R>, StorageError> {
        ensure_scope(scope)?;
        let sql = update_sql::<R>();
        let row = R::bind_update(&update, sqlx::query(&sql))
            .bind(now_epoch_ms())
            .bind(id)
            .bind(&scope.store_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(R::from_row(&row)?))
    }

    async fn delete(&self, scope: &StoreScope, id: &str) -> Result<Option<R>, StorageError> {
        ensure_scope(scope)?;
        let sql = format!(
            "delete from {} where {} = $1 and store_id = $2 returning {}",
            R::TABLE,
            R::ID_COLUMN,
            select_columns::<R>()
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&scope.store_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(R::from_row(&row)?))
    }
}

impl PgCatalogRecord for BillboardRecord {
    const TABLE: &'static str = "billboards";
    const ID_COLUMN: &'static str = "billboard_id";
    const COLUMNS: &'static [&'static str] = &["label", "image_url"];

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            billboard_id: row.try_get("billboard_id")?,
            store_id: row.try_get("store_id")?,
            label: row.try_get("label")?,
            image_url: row.try_get("image_url")?,
            created_at_ms: row.try_get("created_at_ms")?,
            updated_at_ms: row.try_get("updated_at_ms")?,
        })
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.label).bind(&self.image_url)
    }

    fn bind_update<'q>(update: &'q BillboardUpdate, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&update.label).bind(&update.image_url)
    }
}

impl PgCatalogRecord for CategoryRecord {
    const TABLE: &'static str = "categories";
    const ID_COLUMN: &'static str = "category_id";
    const COLUMNS: &'static [&'static str] = &["billboard_id", "name"];

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            category_id: row.try_get("category_id")?,
            store_id: row.try_get("store_id")?,
            billboard_id: row.try_get("billboard_id")?,
            name: row.try_get("name")?,
            created_at_ms: row.try_get("created_at_ms")?,
            updated_at_ms: row.try_get("updated_at_ms")?,
        })
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.billboard_id).bind(&self.name)
    }

    fn bind_update<'q>(update: &'q CategoryUpdate, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&update.billboard_id).bind(&update.name)
    }
}

impl PgCatalogRecord for SizeRecord {
    const TABLE: &'static str = "sizes";
    const ID_COLUMN: &'static str = "size_id";
    const COLUMNS: &'static [&'static str] = &["name", "value"];

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            size_id: row.try_get("size_id")?,
            store_id: row.try_get("store_id")?,
            name: row.try_get("name")?,
            value: row.try_get("value")?,
            created_at_ms: row.try_get("created_at_ms")?,
            updated_at_ms: row.try_get("updated_at_ms")?,
        })
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.name).bind(&self.value)
    }

    fn bind_update<'q>(update: &'q NamedValueUpdate, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&update.name).bind(&update.value)
    }
}

impl PgCatalogRecord for ColorRecord {
    const TABLE: &'static str = "colors";
    const ID_COLUMN: &'static str = "color_id";
    const COLUMNS: &'static [&'static str] = &["name", "value"];

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            color_id: row.try_get("color_id")?,
            store_id: row.try_get("store_id")?,
            name: row.try_get("name")?,
            value: row.try_get("value")?,
            created_at_ms: row.try_get("created_at_ms")?,
            updated_at_ms: row.try_get("updated_at_ms")?,
        })
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&self.name).bind(&self.value)
    }

    fn bind_update<'q>(update: &'q NamedValueUpdate, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(&update.name).bind(&update.value)
    }
}
