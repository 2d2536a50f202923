pub mod resource;

pub use resource::{Operation, ResourceKind};

/// 调用方身份：认证成功后得到的不透明用户 ID。
///
/// 只能通过 [`CallerIdentity::new`] 构造，保证 user_id 非空。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    user_id: String,
}

impl CallerIdentity {
    /// 空白 ID 视为未认证，返回 None。
    pub fn new(user_id: impl Into<String>) -> Option<Self> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return None;
        }
        Some(Self { user_id })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// 店铺作用域：归属校验通过后交给持久化层的执行上下文。
///
/// 所有店铺内资源的更新/删除都必须同时按资源 ID 与 `store_id` 过滤。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreScope {
    pub user_id: String,
    pub store_id: String,
}

impl StoreScope {
    pub fn new(user_id: impl Into<String>, store_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            store_id: store_id.into(),
        }
    }

    /// 以调用方身份构造作用域。
    pub fn for_caller(caller: &CallerIdentity, store_id: impl Into<String>) -> Self {
        Self::new(caller.user_id(), store_id)
    }
}
