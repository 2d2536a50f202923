//! 店铺归属校验

use crate::error::GateError;
use catalog_storage::StoreStore;
use domain::{CallerIdentity, StoreScope};

/// 确认调用方拥有路径中的店铺，返回持久化作用域。
///
/// 单次查询同时匹配 store_id 与 user_id。
pub async fn owned_store(
    stores: &dyn StoreStore,
    caller: &CallerIdentity,
    store_id: &str,
) -> Result<StoreScope, GateError> {
    if store_id.trim().is_empty() {
        return Err(GateError::Forbidden);
    }
    match stores.find_owned_store(caller, store_id).await? {
        Some(store) => Ok(StoreScope::for_caller(caller, store.store_id)),
        None => {
            tracing::debug!(user_id = caller.user_id(), store_id, "store not owned by caller");
            Err(GateError::Forbidden)
        }
    }
}
