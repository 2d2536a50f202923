//! 引用校验
//!
//! 分类引用广告牌，商品引用分类/尺码/颜色；被引用的记录必须属于同一店铺，
//! 否则按对应字段报告 InvalidInput。

use catalog_gate::GateError;
use catalog_storage::{CatalogRecord, CatalogStore};

/// 查找同店铺内的被引用记录
pub async fn same_store_reference<R>(
    store: &dyn CatalogStore<R>,
    store_id: &str,
    id: &str,
    field: &str,
) -> Result<R, GateError>
where
    R: CatalogRecord,
{
    match store.find(id).await? {
        Some(record) if record.store_id() == store_id => Ok(record),
        _ => Err(GateError::invalid(field)),
    }
}
