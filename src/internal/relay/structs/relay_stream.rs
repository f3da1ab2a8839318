use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc;

use crate::internal::classify::structs::TypeDescriptor;
use crate::internal::relay::functions::completion::until_complete;

use super::relay_controller::RelayController;
use super::relay_error::RelayError;
use super::relay_event::RelayEvent;
use super::relay_status::RelayStatus;

/// 面向调用方的中继输出流。
///
/// 依次产出 [`RelayEvent`]，终止事件之后返回 `None`。
/// 不读取时驱动会因背压停下，调用方需要持续消费（或交给 [`RelayStream::into_completion`]）。
#[derive(Debug)]
pub struct RelayStream {
    events: mpsc::Receiver<RelayEvent>,
    controller: RelayController,
    finished: bool,
}

impl RelayStream {
    pub(crate) fn new(events: mpsc::Receiver<RelayEvent>, controller: RelayController) -> Self {
        Self {
            events,
            controller,
            finished: false,
        }
    }

    /// 一开始就失败的传输（如客户端无法创建），只产出一个 `Error`。
    pub(crate) fn failed(error: RelayError) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let (controller, _) = RelayController::new();
        controller.status.update(RelayStatus::Errored);
        // 容量为 1 的新通道，必定可写
        let _ = tx.try_send(RelayEvent::Error(error));
        Self::new(rx, controller)
    }

    /// 请求中止底层请求；可重复调用。
    pub fn abort(&self) {
        self.controller.abort();
    }

    pub fn pause(&self) {
        self.controller.pause();
    }

    pub fn resume(&self) {
        self.controller.resume();
    }

    pub fn status(&self) -> RelayStatus {
        self.controller.status()
    }

    /// 获取可跨任务共享的控制句柄
    pub fn controller(&self) -> RelayController {
        self.controller.clone()
    }

    /// 消费整个流，完成时返回类型描述，见 [`until_complete`]。
    pub async fn into_completion(self) -> Result<TypeDescriptor, RelayError> {
        until_complete(self).await
    }
}

impl Stream for RelayStream {
    type Item = RelayEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        match this.events.poll_recv(cx) {
            Poll::Ready(Some(event)) => {
                if event.is_terminal() {
                    this.finished = true;
                    this.events.close();
                }
                Poll::Ready(Some(event))
            }
            Poll::Ready(None) => {
                this.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
