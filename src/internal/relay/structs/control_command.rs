/// 中继控制命令（通过 QueueReactiveProperty 传递，FIFO 保证顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Pause,
    Resume,
    Abort,
}
