use async_trait::async_trait;
use url::Url;

use crate::internal::http::structs::HttpResponse;
use crate::internal::relay::structs::RelayError;

/// HTTP 客户端接口。
///
/// 连接、TLS、重定向、超时均由实现方负责；超时等失败以 [`RelayError::Network`] 返回。
/// 返回的响应体只会被中继读取。
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn request(&self, url: &Url) -> Result<HttpResponse, RelayError>;
}
