//! 中继相关错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    /// HTTP 客户端在响应到达前或传输过程中报告的错误，原样透出。
    #[error("网络错误: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("请求失败: {status} 状态码")]
    Status { status: u16 },

    /// 过滤器拒绝；`resolved` 为 mime，缺失时为响应头声明的类型。
    #[error("无效类型: {resolved} - 状态码: {status}")]
    InvalidType { resolved: String, status: u16 },

    #[error("打开目标失败: {0}")]
    SinkOpen(#[source] std::io::Error),

    #[error("写入目标失败: {0}")]
    SinkWrite(#[source] std::io::Error),

    /// 仅由完成适配器产生：传输被中止。
    #[error("传输已中止")]
    Aborted,

    #[error("中继在结束前意外中断")]
    Interrupted,

    #[error("输出流已被丢弃")]
    StreamClosed,
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Network(Box::new(e))
    }
}

impl RelayError {
    /// 由类型闸门产生的拒绝
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RelayError::Status { .. } | RelayError::InvalidType { .. }
        )
    }
}
