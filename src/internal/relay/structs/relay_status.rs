use serde::{Deserialize, Serialize};

/// 中继状态（由驱动内部维护，外部只读监听）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayStatus {
    /// 请求已发出，尚未收到响应
    Pending,
    /// 已收到响应，等待首块数据
    Peeking,
    /// 首块已到，类型闸门判定中
    Deciding,
    /// 判定通过，透传剩余数据
    Relaying,
    Completed,
    Errored,
    Aborted,
}

impl RelayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayStatus::Pending => "pending",
            RelayStatus::Peeking => "peeking",
            RelayStatus::Deciding => "deciding",
            RelayStatus::Relaying => "relaying",
            RelayStatus::Completed => "completed",
            RelayStatus::Errored => "errored",
            RelayStatus::Aborted => "aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RelayStatus::Completed | RelayStatus::Errored | RelayStatus::Aborted
        )
    }
}

impl std::fmt::Display for RelayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
