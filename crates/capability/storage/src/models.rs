//! 数据模型
//!
//! 定义所有存储相关的数据模型和更新结构：
//! - 店铺模型：StoreRecord, StoreUpdate
//! - 目录资源：BillboardRecord, CategoryRecord, SizeRecord, ColorRecord（及各自的 Update）
//! - 商品模型：ProductRecord, ImageRecord, ProductUpdate, ProductFilter
//!
//! 更新结构均为整体替换（所有业务字段必填）。

use crate::traits::CatalogRecord;
use domain::ResourceKind;
use std::time::{SystemTime, UNIX_EPOCH};

/// 当前时间戳（毫秒）。
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// 店铺记录（租户）。`user_id` 为创建时写入的唯一所有者，之后不可变更。
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub store_id: String,
    pub user_id: String,
    pub name: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 店铺更新输入（不含所有者字段）。
#[derive(Debug, Clone)]
pub struct StoreUpdate {
    pub name: String,
}

/// 广告牌记录。
#[derive(Debug, Clone, PartialEq)]
pub struct BillboardRecord {
    pub billboard_id: String,
    pub store_id: String,
    pub label: String,
    pub image_url: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Debug, Clone)]
pub struct BillboardUpdate {
    pub label: String,
    pub image_url: String,
}

/// 分类记录（引用同店铺的广告牌）。
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub category_id: String,
    pub store_id: String,
    pub billboard_id: String,
    pub name: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub name: String,
    pub billboard_id: String,
}

/// 尺码记录。
#[derive(Debug, Clone, PartialEq)]
pub struct SizeRecord {
    pub size_id: String,
    pub store_id: String,
    pub name: String,
    pub value: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 颜色记录。
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRecord {
    pub color_id: String,
    pub store_id: String,
    pub name: String,
    pub value: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 尺码/颜色共用的更新输入。
#[derive(Debug, Clone)]
pub struct NamedValueUpdate {
    pub name: String,
    pub value: String,
}

/// 商品图片记录（随商品级联删除）。
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub image_id: String,
    pub product_id: String,
    pub url: String,
    pub created_at_ms: i64,
}

/// 商品记录（含图片）。
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub product_id: String,
    pub store_id: String,
    pub category_id: String,
    pub size_id: String,
    pub color_id: String,
    pub name: String,
    pub price: f64,
    pub is_featured: bool,
    pub is_archived: bool,
    pub images: Vec<ImageRecord>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// 商品更新输入：字段整体替换，图片集合整体重建（同一事务内）。
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
    pub category_id: String,
    pub size_id: String,
    pub color_id: String,
    pub is_featured: bool,
    pub is_archived: bool,
    pub image_urls: Vec<String>,
}

/// 商品列表过滤条件。已归档商品始终排除。
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub featured_only: bool,
}

impl ProductFilter {
    pub fn matches(&self, product: &ProductRecord) -> bool {
        if product.is_archived {
            return false;
        }
        if self.featured_only && !product.is_featured {
            return false;
        }
        let same = |wanted: &Option<String>, actual: &str| {
            wanted.as_deref().is_none_or(|wanted| wanted == actual)
        };
        same(&self.category_id, &product.category_id)
            && same(&self.color_id, &product.color_id)
            && same(&self.size_id, &product.size_id)
    }
}

/// 按图片 URL 构造图片记录（新 ID、同一时间戳）。
pub fn build_images(product_id: &str, urls: &[String], now_ms: i64) -> Vec<ImageRecord> {
    urls.iter()
        .map(|url| ImageRecord {
            image_id: uuid::Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            url: url.clone(),
            created_at_ms: now_ms,
        })
        .collect()
}

impl CatalogRecord for BillboardRecord {
    type Update = BillboardUpdate;
    const KIND: ResourceKind = ResourceKind::Billboard;

    fn id(&self) -> &str {
        &self.billboard_id
    }

    fn store_id(&self) -> &str {
        &self.store_id
    }

    fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    fn apply_update(&mut self, update: BillboardUpdate, now_ms: i64) {
        self.label = update.label;
        self.image_url = update.image_url;
        self.updated_at_ms = now_ms;
    }
}

impl CatalogRecord for CategoryRecord {
    type Update = CategoryUpdate;
    const KIND: ResourceKind = ResourceKind::Category;

    fn id(&self) -> &str {
        &self.category_id
    }

    fn store_id(&self) -> &str {
        &self.store_id
    }

    fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    fn apply_update(&mut self, update: CategoryUpdate, now_ms: i64) {
        self.name = update.name;
        self.billboard_id = update.billboard_id;
        self.updated_at_ms = now_ms;
    }
}

impl CatalogRecord for SizeRecord {
    type Update = NamedValueUpdate;
    const KIND: ResourceKind = ResourceKind::Size;

    fn id(&self) -> &str {
        &self.size_id
    }

    fn store_id(&self) -> &str {
        &self.store_id
    }

    fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    fn apply_update(&mut self, update: NamedValueUpdate, now_ms: i64) {
        self.name = update.name;
        self.value = update.value;
        self.updated_at_ms = now_ms;
    }
}

impl CatalogRecord for ColorRecord {
    type Update = NamedValueUpdate;
    const KIND: ResourceKind = ResourceKind::Color;

    fn id(&self) -> &str {
        &self.color_id
    }

    fn store_id(&self) -> &str {
        &self.store_id
    }

    fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    fn apply_update(&mut self, update: NamedValueUpdate, now_ms: i64) {
        self.name = update.name;
        self.value = update.value;
        self.updated_at_ms = now_ms;
    }
}
