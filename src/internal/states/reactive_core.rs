//! # ReactiveProperty — 响应式属性
//!
//! 基于 [`tokio::sync::watch`] 的值容器：写入方更新，任意多个监听者异步接收最新值。
//! 中继驱动用它发布 [`RelayStatus`](crate::relay::RelayStatus) 与已中继字节数，
//! 读写都不阻塞数据通路。

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

/// 响应式属性错误
#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 所有写入端都已销毁，不会再有新值
    #[error("属性已被销毁")]
    Destroyed,
}

/// 响应式属性：可 Clone，所有克隆共享同一个值。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T: Clone + Send + Sync> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 写入新值并通知所有监听者；没有监听者时同样会保存该值。
    pub fn update(&self, new_value: T) {
        self.sender.send_replace(new_value);
    }

    /// 原地修改当前值。
    pub fn update_field<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(updater);
    }

    /// 当前值的快照（会 clone）。
    pub fn get_current(&self) -> T {
        self.sender.borrow().clone()
    }

    pub fn map<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.sender.borrow())
    }

    /// 创建监听器。监听器创建时的值视为已读，`changed` 只返回之后的更新。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 属性监听器
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 等待下一次变化并返回新值；写入端全部销毁后返回错误。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| ReactivePropertyError::Destroyed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    pub fn borrow(&self) -> T {
        self.receiver.borrow().clone()
    }
}
