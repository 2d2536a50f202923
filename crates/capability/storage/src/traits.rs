//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - StoreStore：店铺存储（含归属查询）
//! - CatalogStore<R>：广告牌/分类/尺码/颜色的通用店铺内 CRUD
//! - ProductStore：商品存储（含图片、过滤、事务更新）
//!
//! 设计原则：
//! - 读接口按 ID 公开查询，不要求身份
//! - 写接口显式接收 StoreScope，更新/删除同时按资源 ID 与 store_id 过滤
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{ProductFilter, ProductRecord, ProductUpdate, StoreRecord, StoreUpdate};
use async_trait::async_trait;
use domain::{CallerIdentity, ResourceKind, StoreScope};

/// 店铺存储接口
#[async_trait]
pub trait StoreStore: Send + Sync {
    /// 列出调用方拥有的店铺
    async fn list_stores(&self, owner: &CallerIdentity) -> Result<Vec<StoreRecord>, StorageError>;

    /// 按 ID 查找店铺（公开读）
    async fn find_store(&self, store_id: &str) -> Result<Option<StoreRecord>, StorageError>;

    /// 归属查询：store_id 与 user_id 在同一条件内匹配
    ///
    /// 店铺不存在与属于他人两种情况均返回 None。
    async fn find_owned_store(
        &self,
        owner: &CallerIdentity,
        store_id: &str,
    ) -> Result<Option<StoreRecord>, StorageError>;

    /// 创建店铺，所有者为调用方
    async fn create_store(
        &self,
        owner: &CallerIdentity,
        record: StoreRecord,
    ) -> Result<StoreRecord, StorageError>;

    /// 更新店铺（按 store_id + user_id 过滤）
    async fn update_store(
        &self,
        scope: &StoreScope,
        update: StoreUpdate,
    ) -> Result<Option<StoreRecord>, StorageError>;

    /// 删除店铺及其全部资源（原子）
    async fn delete_store(&self, scope: &StoreScope) -> Result<Option<StoreRecord>, StorageError>;
}

/// 店铺内目录资源的公共形态。
pub trait CatalogRecord: Clone + Send + Sync + 'static {
    type Update: Send + Sync + 'static;
    const KIND: ResourceKind;

    fn id(&self) -> &str;
    fn store_id(&self) -> &str;
    fn created_at_ms(&self) -> i64;
    fn apply_update(&mut self, update: Self::Update, now_ms: i64);
}

/// 目录资源存储接口（广告牌、分类、尺码、颜色）
#[async_trait]
pub trait CatalogStore<R: CatalogRecord>: Send + Sync {
    /// 列出店铺下的资源（新建在前）
    async fn list(&self, store_id: &str) -> Result<Vec<R>, StorageError>;

    /// 按 ID 查找资源（公开读）
    async fn find(&self, id: &str) -> Result<Option<R>, StorageError>;

    /// 在作用域店铺下创建资源
    async fn create(&self, scope: &StoreScope, record: R) -> Result<R, StorageError>;

    /// 更新资源；不属于作用域店铺时返回 None
    async fn update(
        &self,
        scope: &StoreScope,
        id: &str,
        update: R::Update,
    ) -> Result<Option<R>, StorageError>;

    /// 删除资源并返回被删除的记录；不属于作用域店铺时返回 None
    async fn delete(&self, scope: &StoreScope, id: &str) -> Result<Option<R>, StorageError>;
}

/// 商品存储接口
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 按过滤条件列出店铺商品（排除已归档，新建在前）
    async fn list_products(
        &self,
        store_id: &str,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, StorageError>;

    /// 按 ID 查找商品（公开读，含图片）
    async fn find_product(&self, product_id: &str) -> Result<Option<ProductRecord>, StorageError>;

    /// 创建商品及其图片（原子）
    async fn create_product(
        &self,
        scope: &StoreScope,
        record: ProductRecord,
    ) -> Result<ProductRecord, StorageError>;

    /// 更新商品字段并整体替换图片（原子）
    ///
    /// 图片重建失败时整个更新回滚，商品保留原字段与原图片。
    async fn update_product(
        &self,
        scope: &StoreScope,
        product_id: &str,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, StorageError>;

    /// 删除商品及其图片
    async fn delete_product(
        &self,
        scope: &StoreScope,
        product_id: &str,
    ) -> Result<Option<ProductRecord>, StorageError>;
}
