//! 资源类型与操作类型（用于字段校验与日志标签）。

use std::fmt;

/// 目录资源类型。店铺本身也作为一种资源参与闸门校验。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Store,
    Billboard,
    Category,
    Size,
    Color,
    Product,
}

impl ResourceKind {
    /// 单数日志标签，例如 `BILLBOARD`。
    pub fn tag(self) -> &'static str {
        match self {
            ResourceKind::Store => "STORE",
            ResourceKind::Billboard => "BILLBOARD",
            ResourceKind::Category => "CATEGORY",
            ResourceKind::Size => "SIZE",
            ResourceKind::Color => "COLOR",
            ResourceKind::Product => "PRODUCT",
        }
    }

    /// 复数日志标签，例如 `CATEGORIES`。
    pub fn plural_tag(self) -> &'static str {
        match self {
            ResourceKind::Store => "STORES",
            ResourceKind::Billboard => "BILLBOARDS",
            ResourceKind::Category => "CATEGORIES",
            ResourceKind::Size => "SIZES",
            ResourceKind::Color => "COLORS",
            ResourceKind::Product => "PRODUCTS",
        }
    }

    /// 生成形如 `CATEGORIES_POST` / `BILLBOARD_PATCH` 的日志标签。
    pub fn log_tag(self, operation: Operation) -> String {
        let noun = match operation {
            Operation::List | Operation::Create => self.plural_tag(),
            Operation::Get | Operation::Update | Operation::Delete => self.tag(),
        };
        format!("{noun}_{}", operation.verb())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Store => "store",
            ResourceKind::Billboard => "billboard",
            ResourceKind::Category => "category",
            ResourceKind::Size => "size",
            ResourceKind::Color => "color",
            ResourceKind::Product => "product",
        };
        f.write_str(name)
    }
}

/// 端点操作类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn verb(self) -> &'static str {
        match self {
            Operation::List | Operation::Get => "GET",
            Operation::Create => "POST",
            Operation::Update => "PATCH",
            Operation::Delete => "DELETE",
        }
    }
}
