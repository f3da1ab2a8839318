use crate::internal::states::queue_reactive::{QueueReactiveConsumer, QueueReactiveProperty};
use crate::internal::states::reactive_core::ReactiveProperty;

use super::control_command::ControlCommand;
use super::relay_status::RelayStatus;

/// 中继控制句柄，可 Clone。
///
/// 命令通过 mpsc 队列发送（无锁），状态通过 watch channel 读取（无锁）。
#[derive(Clone, Debug)]
pub struct RelayController {
    command_queue: QueueReactiveProperty<ControlCommand>,
    pub(crate) status: ReactiveProperty<RelayStatus>,
    pub(crate) relayed_bytes: ReactiveProperty<u64>,
}

/// 内部实现
impl RelayController {
    pub(crate) fn new() -> (Self, QueueReactiveConsumer<ControlCommand>) {
        let (command_queue, command_consumer) = QueueReactiveProperty::new();

        let controller = Self {
            command_queue,
            status: ReactiveProperty::new(RelayStatus::Pending),
            relayed_bytes: ReactiveProperty::new(0),
        };

        (controller, command_consumer)
    }

    fn send(&self, command: ControlCommand) {
        // 驱动已结束时队列关闭，命令无处可去，直接丢弃
        let _ = self.command_queue.send(command);
    }
}

/// 外部接口：通过命令队列发送控制命令
impl RelayController {
    /// 请求中止；可重复调用，传输结束后调用无效果。
    pub fn abort(&self) {
        if self.status.map(RelayStatus::is_terminal) {
            return;
        }
        self.send(ControlCommand::Abort);
    }

    /// 暂停从响应读取数据，连接上的数据会因背压停在对端
    pub fn pause(&self) {
        self.send(ControlCommand::Pause);
    }

    pub fn resume(&self) {
        self.send(ControlCommand::Resume);
    }

    pub fn status(&self) -> RelayStatus {
        self.status.get_current()
    }

    /// 已输出到中继流的响应体字节数（含首块）
    pub fn relayed_bytes(&self) -> u64 {
        self.relayed_bytes.get_current()
    }

    /// 最近一次发出的控制命令
    pub fn last_command(&self) -> Option<ControlCommand> {
        self.command_queue.last()
    }
}

/// 响应式属性订阅：外部监听状态变化
impl RelayController {
    /// 订阅状态变化，进入终止状态后自动停止。需要在 tokio 运行时内调用。
    pub fn subscribe_status<F>(&self, return_current_value: bool, callback: F)
    where
        F: Fn(RelayStatus) + Send + 'static,
    {
        let mut watcher = self.status.watch();

        tokio::spawn(async move {
            if return_current_value {
                callback(watcher.borrow());
            }

            while let Ok(status) = watcher.changed().await {
                callback(status);
                if status.is_terminal() {
                    break;
                }
            }
        });
    }

    /// 订阅已中继字节数变化
    pub fn subscribe_relayed_bytes<F>(&self, return_current_value: bool, callback: F)
    where
        F: Fn(u64) + Send + 'static,
    {
        let mut watcher = self.relayed_bytes.watch();

        tokio::spawn(async move {
            if return_current_value {
                callback(watcher.borrow());
            }

            while let Ok(bytes) = watcher.changed().await {
                callback(bytes);
            }
        });
    }
}
