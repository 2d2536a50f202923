//! 存储层错误类型
//!
//! 统一封装底层错误（SQL 执行、连接、锁、数据一致性）。
//! 错误详情只写入日志，不返回给调用方。

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::new(err.to_string())
    }
}
