//! # PostgreSQL 存储实现模块
//!
//! 本模块提供所有存储接口的 PostgreSQL 实现，用于生产环境。
//!
//! ## 设计原则
//!
//! 1. **参数化查询**：所有值通过 `$n` 绑定，表名/列名只来自编译期常量
//! 2. **店铺隔离**：更新/删除同时带 `store_id` 条件，猜到其它店铺的资源 ID 也无法越权
//! 3. **归属原子校验**：`find_owned_store` 在同一条 SQL 中匹配 `store_id` 与 `user_id`
//! 4. **事务**：店铺级联删除、商品创建/更新/删除（含图片）均在单个事务内完成
//!
//! ## 包含的实现
//!
//! - **StoreStore** (`store.rs`)：PgStoreStore
//! - **CatalogStore<R>** (`catalog.rs`)：PgCatalogStore<R>，覆盖 billboards/categories/sizes/colors
//! - **ProductStore** (`product.rs`)：PgProductStore
//!
//! ## 数据库模式要求
//!
//! 参见仓库根目录 `migrations/0001_catalog.sql`：
//! - `stores`（store_id, user_id, name, created_at_ms, updated_at_ms）
//! - `billboards`、`categories`、`sizes`、`colors`（均含 store_id 外键）
//! - `products`（引用 category/size/color）、`images`（引用 product）
//!
//! 外键均为 restrict：被引用的广告牌/分类/尺码/颜色无法删除，
//! 数据库报错后由 handler 统一映射为内部错误。

pub mod catalog;
pub mod product;
pub mod store;

pub use catalog::*;
pub use product::*;
pub use store::*;
