//! 类型识别接口。

use crate::internal::classify::structs::DetectedType;

/// 根据字节内容识别类型。
///
/// 输入可能比签名窗口更短（首块数据不完整），实现必须容忍任意长度的输入，
/// 无法判断时返回 `None`。闭包 `Fn(&[u8]) -> Option<DetectedType>` 自动实现本 trait。
pub trait TypeClassifier: Send + Sync {
    fn detect(&self, bytes: &[u8]) -> Option<DetectedType>;
}

impl<F> TypeClassifier for F
where
    F: Fn(&[u8]) -> Option<DetectedType> + Send + Sync,
{
    fn detect(&self, bytes: &[u8]) -> Option<DetectedType> {
        (self)(bytes)
    }
}
