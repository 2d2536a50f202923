//! 认证能力：JWT 校验与调用方身份解析。
//!
//! 目录后台不负责登录，token 由外部认证提供方签发；
//! 本 crate 只把 `Authorization: Bearer <token>` 解析为 `CallerIdentity`。

mod jwt;

use domain::CallerIdentity;

pub use jwt::JwtManager;

/// 认证相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error("internal error: {0}")]
    Internal(String),
}

/// 身份解析 trait，便于替换认证提供方与测试。
///
/// 未认证不是错误：缺少 header、token 无效或过期时一律返回 None。
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, bearer: Option<&str>) -> Option<CallerIdentity>;
}

/// 基于 JWT access token 的身份解析实现。
pub struct JwtIdentityResolver {
    jwt: JwtManager,
}

impl JwtIdentityResolver {
    pub fn new(jwt: JwtManager) -> Self {
        Self { jwt }
    }
}

impl IdentityResolver for JwtIdentityResolver {
    fn resolve(&self, bearer: Option<&str>) -> Option<CallerIdentity> {
        let token = bearer?;
        match self.jwt.decode_access(token) {
            Ok(identity) => Some(identity),
            Err(err) => {
                tracing::debug!(error = %err, "bearer token rejected");
                None
            }
        }
    }
}
