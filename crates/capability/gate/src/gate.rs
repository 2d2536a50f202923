use crate::error::GateError;
use crate::fields::{MutationFields, validate_required};
use crate::ownership::owned_store;
use catalog_auth::IdentityResolver;
use catalog_storage::StoreStore;
use domain::{CallerIdentity, ResourceKind, StoreScope};
use std::sync::Arc;

/// 资源闸门：身份 → 店铺归属 → 必填字段，顺序固定。
///
/// 除归属查询外不做任何持久化操作。
#[derive(Clone)]
pub struct ResourceGate {
    identity: Arc<dyn IdentityResolver>,
    stores: Arc<dyn StoreStore>,
}

impl ResourceGate {
    pub fn new(identity: Arc<dyn IdentityResolver>, stores: Arc<dyn StoreStore>) -> Self {
        Self { identity, stores }
    }

    /// 解析调用方身份；无法解析时为 Unauthenticated。
    pub fn authenticate(&self, bearer: Option<&str>) -> Result<CallerIdentity, GateError> {
        self.identity
            .resolve(bearer)
            .ok_or(GateError::Unauthenticated)
    }

    /// 删除类操作：身份 + 归属。
    pub async fn authorize(
        &self,
        bearer: Option<&str>,
        store_id: &str,
    ) -> Result<StoreScope, GateError> {
        let caller = self.authenticate(bearer)?;
        owned_store(self.stores.as_ref(), &caller, store_id).await
    }

    /// 创建/更新类操作：身份 + 归属 + 必填字段。
    pub async fn authorize_mutation<B>(
        &self,
        bearer: Option<&str>,
        store_id: &str,
        kind: ResourceKind,
        body: &B,
    ) -> Result<StoreScope, GateError>
    where
        B: MutationFields + Sync + ?Sized,
    {
        let scope = self.authorize(bearer, store_id).await?;
        validate_required(kind, body)?;
        Ok(scope)
    }

    /// 创建店铺：尚无店铺可校验归属，只做身份 + 必填字段。
    pub fn authorize_store_creation<B>(
        &self,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<CallerIdentity, GateError>
    where
        B: MutationFields + ?Sized,
    {
        let caller = self.authenticate(bearer)?;
        validate_required(ResourceKind::Store, body)?;
        Ok(caller)
    }
}

/// 公开读：记录不存在时为 NotFound。
pub fn ensure_exists<T>(found: Option<T>, kind: ResourceKind) -> Result<T, GateError> {
    found.ok_or(GateError::NotFound(kind))
}
