//! 验证辅助函数
//!
//! - ensure_scope：作用域的 user_id 与 store_id 均非空
//! - ensure_in_scope：待写入记录属于作用域店铺

use crate::error::StorageError;
use domain::StoreScope;

/// 验证作用域完整
pub fn ensure_scope(scope: &StoreScope) -> Result<(), StorageError> {
    if scope.user_id.is_empty() {
        return Err(StorageError::new("user_id required"));
    }
    if scope.store_id.is_empty() {
        return Err(StorageError::new("store_id required"));
    }
    Ok(())
}

/// 验证记录归属作用域店铺
pub fn ensure_in_scope(scope: &StoreScope, store_id: &str) -> Result<(), StorageError> {
    ensure_scope(scope)?;
    if scope.store_id != store_id {
        return Err(StorageError::new("store scope mismatch"));
    }
    Ok(())
}
