//! 认证和授权中间件
//!
//! 提供以下中间件和辅助函数：
//! - request_context：请求上下文中间件，注入 request_id/trace_id
//! - bearer_token：从 Authorization 头提取 Bearer token
//! - require_identity：解析调用方身份
//! - require_store_scope：身份 + 店铺归属（删除类操作）
//! - require_mutation：身份 + 店铺归属 + 必填字段（创建/更新类操作）
//! - require_store_creation：身份 + 必填字段（创建店铺）
//!
//! 所有 require_* 在失败时直接返回可发送的错误响应。

use axum::{
    Json,
    body::Body,
    extract::{Request, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use catalog_gate::MutationFields;
use catalog_telemetry::new_request_ids;
use domain::{CallerIdentity, ResourceKind, StoreScope};
use tracing::{Instrument, info_span};

use crate::AppState;
use crate::utils::response::{bad_request_error, gate_error};

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response: Response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// 从请求头中提取 Bearer token
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(header::AUTHORIZATION)?;
    let auth_str = header_value.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

/// 解析调用方身份
pub fn require_identity(
    state: &AppState,
    headers: &HeaderMap,
    tag: &str,
) -> Result<CallerIdentity, Response> {
    state
        .gate
        .authenticate(bearer_token(headers))
        .map_err(|err| gate_error(tag, err))
}

/// 验证调用方拥有店铺
pub async fn require_store_scope(
    state: &AppState,
    headers: &HeaderMap,
    store_id: &str,
    tag: &str,
) -> Result<StoreScope, Response> {
    state
        .gate
        .authorize(bearer_token(headers), store_id)
        .await
        .map_err(|err| gate_error(tag, err))
}

/// 验证创建/更新请求
///
/// 请求体无法解析时，仍先完成身份与归属校验，再返回 400。
pub async fn require_mutation<B>(
    state: &AppState,
    headers: &HeaderMap,
    store_id: &str,
    kind: ResourceKind,
    body: Result<Json<B>, JsonRejection>,
    tag: &str,
) -> Result<(StoreScope, B), Response>
where
    B: MutationFields + Sync,
{
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            require_store_scope(state, headers, store_id, tag).await?;
            return Err(bad_request_error(rejection.body_text()));
        }
    };
    let scope = state
        .gate
        .authorize_mutation(bearer_token(headers), store_id, kind, &req)
        .await
        .map_err(|err| gate_error(tag, err))?;
    Ok((scope, req))
}

/// 验证创建店铺请求
pub fn require_store_creation<B>(
    state: &AppState,
    headers: &HeaderMap,
    body: Result<Json<B>, JsonRejection>,
    tag: &str,
) -> Result<(CallerIdentity, B), Response>
where
    B: MutationFields,
{
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            require_identity(state, headers, tag)?;
            return Err(bad_request_error(rejection.body_text()));
        }
    };
    let caller = state
        .gate
        .authorize_store_creation(bearer_token(headers), &req)
        .map_err(|err| gate_error(tag, err))?;
    Ok((caller, req))
}

#[cfg(test)]
mod tests {
    use super::bearer_token;
    use axum::http::{HeaderMap, HeaderValue, header};

    #[test]
    fn bearer_token_extracts() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer token-1"),
        );
        assert_eq!(bearer_token(&headers), Some("token-1"));
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("token-1"));
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
