//! 免配置入口：每次调用都以默认 [`ClientConfig`] 新建客户端。
//! 需要复用连接或自定义超时、认证时请使用 [`Downldr`]。

use crate::internal::classify::structs::TypeDescriptor;
use crate::internal::http::structs::ClientConfig;
use crate::internal::relay::structs::{RelayError, RelayStream, TransferOptions};

use super::downldr::Downldr;

/// 发起一次传输，返回事件流。
///
/// 客户端创建失败时，返回的流只产出一个 `Error` 事件。
pub fn transfer(url: &str, options: TransferOptions) -> RelayStream {
    match Downldr::new(&ClientConfig::default()) {
        Ok(downldr) => downldr.transfer(url, options),
        Err(e) => RelayStream::failed(e),
    }
}

/// 传输并等待结束。
///
/// - 正常完成：`Ok(TypeDescriptor)`
/// - 被拒绝或出错：对应的 [`RelayError`]
/// - 被中止：[`RelayError::Aborted`]
pub async fn transfer_as_future(
    url: &str,
    options: TransferOptions,
) -> Result<TypeDescriptor, RelayError> {
    transfer(url, options).into_completion().await
}
