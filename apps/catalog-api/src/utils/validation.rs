//! 输入整理辅助函数
//!
//! 必填字段已由闸门校验，这里只负责取值：
//! - take_text：去除首尾空格
//! - take_image_urls：去除首尾空格，保持原顺序

use api_contract::ImageInput;

/// 取出已校验的文本字段（去除首尾空格）
pub fn take_text(value: Option<String>) -> String {
    value
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// 取出已校验的图片 URL 列表
pub fn take_image_urls(images: Option<Vec<ImageInput>>) -> Vec<String> {
    images
        .unwrap_or_default()
        .into_iter()
        .map(|image| image.url.trim().to_string())
        .collect()
}
