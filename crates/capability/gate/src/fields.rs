//! 必填字段校验
//!
//! 先按列表顺序做存在性检查（第一个缺失字段即失败），
//! 全部存在后再做取值检查（价格非负且有限、图片 URL 非空白）。

use crate::error::GateError;
use api_contract::{
    BillboardRequest, CategoryRequest, NamedValueRequest, ProductRequest, StoreRequest,
};
use domain::ResourceKind;

/// 请求体中单个字段的取值视图。
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
    List(Vec<&'a str>),
}

impl<'a> FieldValue<'a> {
    fn text(value: &'a Option<String>) -> Self {
        match value {
            Some(value) => FieldValue::Text(value.as_str()),
            None => FieldValue::Missing,
        }
    }

    fn is_present(&self) -> bool {
        match self {
            FieldValue::Missing => false,
            FieldValue::Text(value) => !value.trim().is_empty(),
            // 0 是合法数值
            FieldValue::Number(_) => true,
            FieldValue::List(items) => !items.is_empty(),
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            FieldValue::Number(value) => value.is_finite() && *value >= 0.0,
            FieldValue::List(items) => items.iter().all(|item| !item.trim().is_empty()),
            _ => true,
        }
    }
}

/// 变更请求体按线上字段名暴露取值。
pub trait MutationFields {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

/// 各资源的必填字段（线上名称，按校验顺序）。
pub fn required_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Store => &["name"],
        ResourceKind::Billboard => &["label", "imageUrl"],
        ResourceKind::Category => &["name", "billboardId"],
        ResourceKind::Size | ResourceKind::Color => &["name", "value"],
        ResourceKind::Product => &["name", "price", "images", "categoryId", "sizeId", "colorId"],
    }
}

/// 校验请求体满足该资源的必填字段要求。
pub fn validate_required<B>(kind: ResourceKind, body: &B) -> Result<(), GateError>
where
    B: MutationFields + ?Sized,
{
    let fields = required_fields(kind);
    for name in fields {
        if !body.field(name).is_present() {
            return Err(GateError::required(*name));
        }
    }
    for name in fields {
        if !body.field(name).is_valid() {
            return Err(GateError::invalid(*name));
        }
    }
    Ok(())
}

impl MutationFields for StoreRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::text(&self.name),
            _ => FieldValue::Missing,
        }
    }
}

impl MutationFields for BillboardRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "label" => FieldValue::text(&self.label),
            "imageUrl" => FieldValue::text(&self.image_url),
            _ => FieldValue::Missing,
        }
    }
}

impl MutationFields for CategoryRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::text(&self.name),
            "billboardId" => FieldValue::text(&self.billboard_id),
            _ => FieldValue::Missing,
        }
    }
}

impl MutationFields for NamedValueRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::text(&self.name),
            "value" => FieldValue::text(&self.value),
            _ => FieldValue::Missing,
        }
    }
}

impl MutationFields for ProductRequest {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::text(&self.name),
            "price" => self
                .price
                .map(FieldValue::Number)
                .unwrap_or(FieldValue::Missing),
            "images" => match &self.images {
                Some(images) => {
                    FieldValue::List(images.iter().map(|image| image.url.as_str()).collect())
                }
                None => FieldValue::Missing,
            },
            "categoryId" => FieldValue::text(&self.category_id),
            "sizeId" => FieldValue::text(&self.size_id),
            "colorId" => FieldValue::text(&self.color_id),
            _ => FieldValue::Missing,
        }
    }
}
