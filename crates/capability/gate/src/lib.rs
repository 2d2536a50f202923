//! 店铺作用域授权与变更校验闸门。
//!
//! 每个写端点都走同一条路径：
//! 1. 解析调用方身份（`IdentityResolver`）
//! 2. 单次查询确认调用方拥有路径中的店铺（`ownership`）
//! 3. 按资源类型校验必填字段（`fields`）
//!
//! 任一步失败立即返回 `GateError`，成功时返回交给持久化层的 `StoreScope`。

mod error;
mod fields;
mod gate;
mod ownership;

pub use error::{FieldProblem, GateError};
pub use fields::{FieldValue, MutationFields, required_fields, validate_required};
pub use gate::{ResourceGate, ensure_exists};
pub use ownership::owned_store;
