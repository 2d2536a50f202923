use catalog_config::{AppConfig, ConfigError};

// 环境变量为进程级状态，所有断言放在同一个测试内顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::remove_var("CATALOG_JWT_SECRET");
    }
    let err = AppConfig::from_env().expect_err("secret required");
    assert!(matches!(err, ConfigError::Missing(key) if key == "CATALOG_JWT_SECRET"));

    unsafe {
        std::env::set_var("CATALOG_JWT_SECRET", "secret");
        std::env::set_var("CATALOG_HTTP_ADDR", "127.0.0.1:8081");
        std::env::remove_var("CATALOG_DATABASE_URL");
        std::env::remove_var("CATALOG_DB_MAX_CONNECTIONS");
        std::env::remove_var("CATALOG_JWT_ACCESS_TTL_SECONDS");
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8081");
    assert_eq!(config.database_url, None);
    assert_eq!(config.db_max_connections, 8);
    assert_eq!(config.jwt_access_ttl_seconds, 3600);

    unsafe {
        std::env::set_var("CATALOG_DATABASE_URL", "postgres://catalog@localhost/catalog");
        std::env::set_var("CATALOG_JWT_ACCESS_TTL_SECONDS", "soon");
    }
    let err = AppConfig::from_env().expect_err("ttl invalid");
    assert!(matches!(err, ConfigError::Invalid(key, value)
        if key == "CATALOG_JWT_ACCESS_TTL_SECONDS" && value == "soon"));

    unsafe {
        std::env::set_var("CATALOG_JWT_ACCESS_TTL_SECONDS", "600");
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(
        config.database_url.as_deref(),
        Some("postgres://catalog@localhost/catalog")
    );
    assert_eq!(config.jwt_access_ttl_seconds, 600);
}
