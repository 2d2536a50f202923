//! # Catalog Storage 模块
//!
//! 本模块提供目录后台的数据存储抽象层，支持内存与 PostgreSQL 两种后端。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：StoreStore / CatalogStore<R> / ProductStore
//! 2. **数据模型层** (`models.rs`)：店铺、目录资源、商品与图片记录
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **验证辅助层** (`validation.rs`)：店铺作用域校验
//! 5. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 6. **实现层**：
//!    - `in_memory/`：内存存储实现（测试、演示，以及未配置数据库时的服务后端）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 店铺隔离
//!
//! - 所有写接口显式接收 `StoreScope`，由资源闸门在归属校验通过后构造
//! - 更新/删除同时按资源 ID 与 `store_id` 过滤，命中不到时返回 `None`
//! - 读接口为公开读，不要求身份
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use catalog_storage::{InMemoryCatalog, StoreStore};
//! use domain::CallerIdentity;
//!
//! let catalog = InMemoryCatalog::with_default_store();
//! let owner = CallerIdentity::new("user-1").unwrap();
//! let store = catalog.find_owned_store(&owner, "store-1").await?;
//! ```
//!
//! ## 设计约束
//!
//! - **禁止直接 SQL**：Handler 层禁止直接写 SQL，统一通过 storage 层
//! - **参数化查询**：所有 SQL 使用参数绑定

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;
pub mod validation;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

// 内存存储实现
pub use in_memory::{CatalogTables, InMemoryCatalog, catalog::InMemoryTable};

// PostgreSQL 存储实现
pub use postgres::{PgCatalogRecord, PgCatalogStore, PgProductStore, PgStoreStore};
