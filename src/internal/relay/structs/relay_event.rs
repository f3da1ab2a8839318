use bytes::Bytes;

use crate::internal::classify::structs::TypeDescriptor;

use super::relay_error::RelayError;

/// 输出流上按序到达的事件。
///
/// `Type` 至多一次且先于任何 `Data`；`Complete` / `Abort` / `Error` 为终止事件，
/// 每次传输恰好一个，之后流结束。
#[derive(Debug)]
pub enum RelayEvent {
    /// 类型闸门通过后的类型描述
    Type(TypeDescriptor),
    /// 响应体数据，首块在最前
    Data(Bytes),
    /// 响应体已全部中继，且分流目标（如有）已写完关闭
    Complete,
    /// 传输被中止
    Abort,
    Error(RelayError),
}

impl RelayEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RelayEvent::Complete | RelayEvent::Abort | RelayEvent::Error(_)
        )
    }
}
