use core::fmt;

use serde::{Deserialize, Serialize};

/// 默认重定向上限
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// 默认 User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("downldr/", env!("CARGO_PKG_VERSION"));

/// HTTP 客户端配置，创建 [`ReqwestClient`](super::ReqwestClient) 时显式传入，
/// 不存在进程级的全局默认值。
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 整个请求（含读取响应体）的超时（毫秒），`None` 为不限
    pub timeout_ms: Option<u64>,
    /// 建立连接的超时（毫秒）
    pub connect_timeout_ms: Option<u64>,
    pub user_agent: String,
    /// 最多跟随的重定向次数，0 表示不跟随
    pub max_redirects: usize,
    pub basic_auth: Option<BasicAuth>,
    /// 每个请求都带上的额外请求头
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            connect_timeout_ms: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            basic_auth: None,
            headers: Vec::new(),
        }
    }
}

/// 防止 debug 泄漏账号
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("timeout_ms", &self.timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("max_redirects", &self.max_redirects)
            .field("basic_auth", &self.basic_auth)
            .field("headers", &self.headers)
            .finish()
    }
}

/// Basic 认证账号
#[derive(Clone, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .finish()
    }
}
