use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use futures_util::StreamExt;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
    redirect::Policy,
};
use url::Url;

use crate::internal::http::traits::HttpClient;
use crate::internal::relay::structs::RelayError;

use super::client_config::ClientConfig;
use super::http_response::HttpResponse;

/// 基于 reqwest 的 HTTP 客户端
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    client: Client, // 内部是Arc，clone 很轻
}

impl ReqwestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, RelayError> {
        let headers = build_default_headers(config)?;

        let policy = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .redirect(policy);

        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// 复用已构建好的 reqwest 客户端
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn request(&self, url: &Url) -> Result<HttpResponse, RelayError> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp
            .bytes_stream()
            .map(|chunk| chunk.map_err(RelayError::from))
            .boxed();

        Ok(HttpResponse::new(status, headers, body))
    }
}

fn build_default_headers(config: &ClientConfig) -> Result<HeaderMap, RelayError> {
    let mut headers = HeaderMap::new();

    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RelayError::Network(Box::new(e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| RelayError::Network(Box::new(e)))?;
        headers.insert(name, value);
    }

    if let Some(auth) = &config.basic_auth {
        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", auth.username, auth.password));
        let mut auth_value = HeaderValue::from_str(&format!("Basic {}", token))
            .map_err(|e| RelayError::Network(Box::new(e)))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
    }

    Ok(headers)
}
