//! 完成适配器：把事件流收敛成单个结果。

use futures_util::StreamExt;

use crate::internal::classify::structs::TypeDescriptor;
use crate::internal::relay::structs::{RelayError, RelayEvent, RelayStream};

/// 消费整个中继流。
///
/// - `Complete`：返回之前收到的类型描述
/// - `Error`：返回该错误
/// - `Abort`：返回 [`RelayError::Aborted`]，不会一直挂起
/// - 流在终止事件前结束：返回 [`RelayError::Interrupted`]
pub async fn until_complete(mut stream: RelayStream) -> Result<TypeDescriptor, RelayError> {
    let mut descriptor = None;

    while let Some(event) = stream.next().await {
        match event {
            RelayEvent::Type(d) => descriptor = Some(d),
            RelayEvent::Data(_) => {}
            RelayEvent::Complete => return descriptor.ok_or(RelayError::Interrupted),
            RelayEvent::Abort => return Err(RelayError::Aborted),
            RelayEvent::Error(e) => return Err(e),
        }
    }

    Err(RelayError::Interrupted)
}
