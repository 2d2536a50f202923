//! 闸门结果分类

use catalog_storage::StorageError;
use domain::ResourceKind;
use std::fmt;

/// 字段问题：缺失（或为空）与取值非法分开报告。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Required,
    Invalid,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Required => f.write_str("is required"),
            FieldProblem::Invalid => f.write_str("is invalid"),
        }
    }
}

/// 闸门拒绝原因。每种原因在检测点直接转换为响应。
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("unauthenticated")]
    Unauthenticated,
    /// 店铺不存在与属于他人统一报告为 Forbidden
    #[error("forbidden")]
    Forbidden,
    #[error("{field} {problem}")]
    InvalidInput { field: String, problem: FieldProblem },
    #[error("{0} not found")]
    NotFound(ResourceKind),
    #[error("storage error: {0}")]
    Internal(#[from] StorageError),
}

impl GateError {
    pub fn required(field: impl Into<String>) -> Self {
        GateError::InvalidInput {
            field: field.into(),
            problem: FieldProblem::Required,
        }
    }

    pub fn invalid(field: impl Into<String>) -> Self {
        GateError::InvalidInput {
            field: field.into(),
            problem: FieldProblem::Invalid,
        }
    }

    /// InvalidInput 对应的字段名（线上名称，camelCase）。
    pub fn field(&self) -> Option<&str> {
        match self {
            GateError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}
