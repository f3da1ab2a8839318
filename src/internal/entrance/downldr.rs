use std::sync::Arc;

use tokio::sync::mpsc;

use crate::internal::classify::structs::{SignatureClassifier, TypeDescriptor};
use crate::internal::classify::traits::TypeClassifier;
use crate::internal::http::structs::{ClientConfig, ReqwestClient};
use crate::internal::http::traits::HttpClient;
use crate::internal::relay::functions::run_relay::RelayDriver;
use crate::internal::relay::structs::{RelayController, RelayError, RelayStream, TransferOptions};

/// 中继流默认缓冲的事件数
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// 配置好的中继入口，可 Clone，多个传输共享同一个 HTTP 客户端。
///
/// ```ignore
/// let downldr = Downldr::new(&ClientConfig::default())?;
/// let mut stream = downldr.transfer(
///     "https://example.com/avatar",
///     TransferOptions::new().filter(|t, _, _| t.mime() == Some("image/png")),
/// );
/// while let Some(event) = stream.next().await { /* ... */ }
/// ```
#[derive(Clone)]
pub struct Downldr {
    client: Arc<dyn HttpClient>,
    classifier: Arc<dyn TypeClassifier>,
    event_capacity: usize,
}

impl Downldr {
    /// 以默认的 reqwest 客户端创建
    pub fn new(config: &ClientConfig) -> Result<Self, RelayError> {
        Ok(Self::with_client(ReqwestClient::new(config)?))
    }

    /// 使用自定义 HTTP 客户端
    pub fn with_client(client: impl HttpClient + 'static) -> Self {
        Self {
            client: Arc::new(client),
            classifier: Arc::new(SignatureClassifier::new()),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// 替换类型识别器
    pub fn classifier(mut self, classifier: impl TypeClassifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    /// 中继流的缓冲容量，最小为 1
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// 发起一次传输。请求在后台任务中立即开始，需要在 tokio 运行时内调用。
    pub fn transfer(&self, url: &str, options: TransferOptions) -> RelayStream {
        let (controller, commands) = RelayController::new();
        let (events_tx, events_rx) = mpsc::channel(self.event_capacity);

        let driver = RelayDriver::new(
            Arc::clone(&self.client),
            Arc::clone(&self.classifier),
            url.to_string(),
            options,
            events_tx,
            commands,
            &controller,
        );
        tokio::spawn(driver.run());

        RelayStream::new(events_rx, controller)
    }

    /// 传输并等待结束，完成时返回类型描述
    pub async fn transfer_as_future(
        &self,
        url: &str,
        options: TransferOptions,
    ) -> Result<TypeDescriptor, RelayError> {
        self.transfer(url, options).into_completion().await
    }
}

impl std::fmt::Debug for Downldr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Downldr")
            .field("event_capacity", &self.event_capacity)
            .finish_non_exhaustive()
    }
}
