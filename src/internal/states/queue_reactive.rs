//! # QueueReactiveProperty — 命令队列
//!
//! 基于 `tokio::sync::mpsc::unbounded_channel` 的单向 FIFO 队列。
//! 生产者可 Clone（控制句柄持有），消费者唯一（中继驱动持有）。
//! 同时记录最近一条命令，供控制句柄查询。

use tokio::sync::mpsc;

use super::reactive_core::ReactiveProperty;

/// 队列生产者端
#[derive(Clone, Debug)]
pub(crate) struct QueueReactiveProperty<T: Clone + Send + Sync + 'static> {
    sender: mpsc::UnboundedSender<T>,
    last: ReactiveProperty<Option<T>>,
}

/// 队列消费者端，不可 Clone
#[derive(Debug)]
pub(crate) struct QueueReactiveConsumer<T: Clone + Send + Sync + 'static> {
    receiver: mpsc::UnboundedReceiver<T>,
}

impl<T> QueueReactiveProperty<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// 返回 (生产者, 消费者)。
    pub(crate) fn new() -> (Self, QueueReactiveConsumer<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let producer = Self {
            sender,
            last: ReactiveProperty::new(None),
        };
        (producer, QueueReactiveConsumer { receiver })
    }

    /// 推入一条命令；消费者已销毁时原样退回。
    pub(crate) fn send(&self, value: T) -> Result<(), T> {
        self.last.update(Some(value.clone()));
        self.sender.send(value).map_err(|e| e.0)
    }

    pub(crate) fn last(&self) -> Option<T> {
        self.last.get_current()
    }
}

impl<T> QueueReactiveConsumer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// 等待下一条命令；所有生产者都销毁后返回 `None`。
    pub(crate) async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }
}
