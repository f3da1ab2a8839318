//! 带前缀的字节流：先产出已经读出的前缀，再继续读取底层流。
//!
//! 用于窥探首块后把它回填到流的最前面，之后的数据原样透传，顺序不变。

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::Stream;

/// 前缀最多产出一次，空前缀直接跳过。
pub struct PrefixedStream<S> {
    prefix: Option<Bytes>,
    inner: S,
}

impl<S> PrefixedStream<S> {
    pub fn new(prefix: Bytes, inner: S) -> Self {
        Self {
            prefix: (!prefix.is_empty()).then_some(prefix),
            inner,
        }
    }

    /// 前缀是否尚未产出
    pub fn has_pending_prefix(&self) -> bool {
        self.prefix.is_some()
    }
}

impl<S, E> Stream for PrefixedStream<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(prefix) = this.prefix.take() {
            return Poll::Ready(Some(Ok(prefix)));
        }
        Pin::new(&mut this.inner).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let extra = usize::from(self.prefix.is_some());
        let (lower, upper) = self.inner.size_hint();
        (
            lower.saturating_add(extra),
            upper.and_then(|u| u.checked_add(extra)),
        )
    }
}
