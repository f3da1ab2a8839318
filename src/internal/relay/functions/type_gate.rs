//! 类型闸门：状态码策略 + 魔数识别 + 调用方过滤器，给出接受或拒绝。

use reqwest::header::HeaderMap;

use crate::internal::classify::structs::TypeDescriptor;
use crate::internal::classify::traits::TypeClassifier;
use crate::internal::http::structs::http_response::declared_content_type;
use crate::internal::relay::structs::{RelayError, TransferOptions};

/// 纯判定函数，不修改任何输入。
///
/// 1. 未设置 `ignore_status` 且状态码不在 `[200, 300)` 时以 [`RelayError::Status`] 拒绝；
/// 2. 识别首块（空首块视为未识别），以响应头的 content-type 为默认值；
/// 3. 过滤器返回 `false` 时以 [`RelayError::InvalidType`] 拒绝。
pub fn evaluate(
    first_chunk: &[u8],
    status: u16,
    headers: &HeaderMap,
    options: &TransferOptions,
    classifier: &dyn TypeClassifier,
) -> Result<TypeDescriptor, RelayError> {
    if !options.ignore_status && !(200..300).contains(&status) {
        return Err(RelayError::Status { status });
    }

    let detected = if first_chunk.is_empty() {
        None
    } else {
        classifier.detect(first_chunk)
    };
    let descriptor = TypeDescriptor::from_parts(detected, declared_content_type(headers));

    if let Some(filter) = &options.filter {
        if !filter.accept(&descriptor, first_chunk, status) {
            return Err(RelayError::InvalidType {
                resolved: descriptor.resolved().to_string(),
                status,
            });
        }
    }

    Ok(descriptor)
}
