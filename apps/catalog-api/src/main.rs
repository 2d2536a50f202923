//! 目录后台 HTTP API：店铺、广告牌、分类、尺码、颜色与商品。

mod handlers;
mod middleware;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod utils;

pub use state::AppState;

use axum::{Router, middleware::from_fn};
use catalog_auth::{JwtIdentityResolver, JwtManager};
use catalog_config::AppConfig;
use catalog_storage::{InMemoryCatalog, connect_pool};
use catalog_telemetry::init_tracing;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_access_ttl_seconds);
    let identity = Arc::new(JwtIdentityResolver::new(jwt));

    // 配置了数据库则使用 Postgres（需先执行 migrations），否则退回内存存储
    let state = match config.database_url.as_deref() {
        Some(url) => {
            let pool = connect_pool(url, config.db_max_connections).await?;
            tracing::info!(max_connections = config.db_max_connections, "using postgres storage");
            AppState::postgres(identity, pool)
        }
        None => {
            tracing::warn!("CATALOG_DATABASE_URL not set, using in-memory storage");
            AppState::in_memory(identity, Arc::new(InMemoryCatalog::new()))
        }
    };
    let db_pool = state.db_pool.clone();

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    tracing::info!(addr = %config.http_addr, "catalog api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }
    Ok(())
}

/// 组装完整应用：路由同时挂载在 / 与 /api 下
fn build_app(state: AppState) -> Router {
    let api = routes::create_api_router();
    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 注入 request_id/trace_id
        .layer(from_fn(middleware::request_context))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "failed to listen for sigterm"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{auth_headers, read_json, seeded_state};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_is_served_under_both_prefixes() {
        let (state, _) = seeded_state().await;
        let app = build_app(state);
        for uri in ["/health", "/api/health"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().contains_key("x-request-id"));
        }
    }

    #[tokio::test]
    async fn create_store_without_token_is_unauthenticated() {
        let (state, _) = seeded_state().await;
        let response = build_app(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/stores")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Outlet"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request_after_ownership() {
        let (state, _) = seeded_state().await;
        let app = build_app(state);
        let send = |user_id: &str| {
            let mut request = Request::builder()
                .method("POST")
                .uri("/api/stores/store-1/sizes")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .expect("request");
            request.headers_mut().extend(auth_headers(user_id));
            app.clone().oneshot(request)
        };

        let stranger = send("user-2").await.expect("response");
        assert_eq!(stranger.status(), StatusCode::FORBIDDEN);

        let owner = send("user-1").await.expect("response");
        assert_eq!(owner.status(), StatusCode::BAD_REQUEST);
        let body = read_json(owner).await;
        assert_eq!(body["error"]["code"], "INVALID.REQUEST");
    }

    #[tokio::test]
    async fn public_reads_go_through_router() {
        let (state, _) = seeded_state().await;
        let response = build_app(state)
            .oneshot(
                Request::builder()
                    .uri("/stores/store-1/billboards/b1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["label"], "Summer");
    }
}
