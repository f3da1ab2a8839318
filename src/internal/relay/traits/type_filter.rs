//! 类型过滤接口：调用方自定义的接受 / 拒绝判定。

use crate::internal::classify::structs::TypeDescriptor;

/// 返回 `false` 即拒绝本次传输。
///
/// 闭包 `Fn(&TypeDescriptor, &[u8], u16) -> bool` 自动实现本 trait，
/// 参数依次为类型描述、首块字节、状态码。
pub trait TypeFilter: Send + Sync {
    fn accept(&self, descriptor: &TypeDescriptor, first_chunk: &[u8], status: u16) -> bool;
}

impl<F> TypeFilter for F
where
    F: Fn(&TypeDescriptor, &[u8], u16) -> bool + Send + Sync,
{
    fn accept(&self, descriptor: &TypeDescriptor, first_chunk: &[u8], status: u16) -> bool {
        (self)(descriptor, first_chunk, status)
    }
}
