//! 中继驱动：每次传输一个任务，按 Pending → Peeking → Deciding → Relaying 推进，
//! 结束时恰好发出一个终止事件。

use std::sync::Arc;

use bytes::Bytes;
use futures_util::{StreamExt, stream};
use tokio::sync::mpsc;
use url::Url;

use crate::internal::classify::traits::TypeClassifier;
use crate::internal::http::structs::{HttpResponse, ResponseBody};
use crate::internal::http::traits::HttpClient;
use crate::internal::relay::structs::fan_out_sink::FanOutSink;
use crate::internal::relay::structs::{
    ControlCommand, PrefixedStream, RelayController, RelayError, RelayEvent, RelayStatus,
    TransferOptions,
};
use crate::internal::states::queue_reactive::QueueReactiveConsumer;
use crate::internal::states::reactive_core::ReactiveProperty;

use super::type_gate;

/// 驱动提前停止的原因
enum Halt {
    Aborted,
    Failed(RelayError),
}

impl From<RelayError> for Halt {
    fn from(e: RelayError) -> Self {
        Halt::Failed(e)
    }
}

/// select 的结果：控制命令，或等待中的操作完成
enum Step<T> {
    Command(Option<ControlCommand>),
    Ready(T),
}

pub(crate) struct RelayDriver {
    client: Arc<dyn HttpClient>,
    classifier: Arc<dyn TypeClassifier>,
    url: String,
    options: TransferOptions,
    events: mpsc::Sender<RelayEvent>,
    commands: QueueReactiveConsumer<ControlCommand>,
    // 只持有状态属性，不持有命令生产者：控制句柄全部销毁时命令队列随之关闭
    status: ReactiveProperty<RelayStatus>,
    relayed_bytes: ReactiveProperty<u64>,
    paused: bool,
}

impl RelayDriver {
    pub(crate) fn new(
        client: Arc<dyn HttpClient>,
        classifier: Arc<dyn TypeClassifier>,
        url: String,
        options: TransferOptions,
        events: mpsc::Sender<RelayEvent>,
        commands: QueueReactiveConsumer<ControlCommand>,
        controller: &RelayController,
    ) -> Self {
        Self {
            client,
            classifier,
            url,
            options,
            events,
            commands,
            status: controller.status.clone(),
            relayed_bytes: controller.relayed_bytes.clone(),
            paused: false,
        }
    }

    /// 驱动整个传输，最后一步发出终止事件。
    pub(crate) async fn run(mut self) {
        let (status, terminal) = match self.drive().await {
            Ok(()) => (RelayStatus::Completed, RelayEvent::Complete),
            Err(Halt::Aborted) => {
                tracing::debug!(url = %self.url, "传输已中止");
                (RelayStatus::Aborted, RelayEvent::Abort)
            }
            Err(Halt::Failed(RelayError::StreamClosed)) => {
                tracing::debug!(url = %self.url, "输出流已被丢弃，停止中继");
                (RelayStatus::Errored, RelayEvent::Error(RelayError::StreamClosed))
            }
            Err(Halt::Failed(e)) => {
                tracing::warn!(url = %self.url, error = %e, "传输失败");
                (RelayStatus::Errored, RelayEvent::Error(e))
            }
        };

        self.status.update(status);
        // 调用方已丢弃输出流时无人接收，忽略即可
        let _ = self.events.send(terminal).await;
    }

    async fn drive(&mut self) -> Result<(), Halt> {
        let url = Url::parse(&self.url)
            .map_err(|e| RelayError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        tracing::info!(url = %url, "开始传输");

        // Pending：等待响应，期间可被中止
        let response = {
            let client = Arc::clone(&self.client);
            let mut request = client.request(&url);

            loop {
                let step = tokio::select! {
                    biased;
                    cmd = next_command(&mut self.commands, &self.events) => Step::Command(cmd),
                    resp = &mut request => Step::Ready(resp),
                };
                match step {
                    Step::Command(cmd) => apply(cmd, &mut self.paused)?,
                    Step::Ready(resp) => break resp?,
                }
            }
        };

        // Peeking：只取一块
        self.set_status(RelayStatus::Peeking);
        let HttpResponse {
            status,
            headers,
            mut body,
        } = response;

        let first = loop {
            let step = tokio::select! {
                biased;
                cmd = next_command(&mut self.commands, &self.events) => Step::Command(cmd),
                chunk = body.next(), if !self.paused => Step::Ready(chunk),
            };
            match step {
                Step::Command(cmd) => apply(cmd, &mut self.paused)?,
                Step::Ready(chunk) => break chunk,
            }
        };
        let (first, drained) = match first {
            Some(Ok(chunk)) => (chunk, false),
            Some(Err(e)) => return Err(e.into()),
            // 响应体为空：按空首块判定
            None => (Bytes::new(), true),
        };

        // Deciding
        self.set_status(RelayStatus::Deciding);
        let descriptor = match type_gate::evaluate(
            &first,
            status,
            &headers,
            &self.options,
            self.classifier.as_ref(),
        ) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                // 拒绝：销毁响应，不输出任何数据
                drop(body);
                return Err(e.into());
            }
        };

        tracing::info!(
            url = %url,
            status,
            mime = descriptor.resolved(),
            "类型判定通过"
        );
        let ext = descriptor.ext().map(str::to_owned);
        self.emit(RelayEvent::Type(descriptor)).await?;

        // 目标只在判定通过后按扩展名解析一次
        let mut sink = match self.options.target.take() {
            Some(target) => Some(self.guarded(FanOutSink::open(target, ext.as_deref())).await?),
            None => None,
        };

        // Relaying：首块回填到最前面，之后原样透传
        self.set_status(RelayStatus::Relaying);
        let rest: ResponseBody = if drained { stream::empty().boxed() } else { body };
        let mut body = PrefixedStream::new(first, rest);

        loop {
            let step = tokio::select! {
                biased;
                cmd = next_command(&mut self.commands, &self.events) => Step::Command(cmd),
                chunk = body.next(), if !self.paused => Step::Ready(chunk),
            };
            match step {
                Step::Command(cmd) => apply(cmd, &mut self.paused)?,
                Step::Ready(Some(Ok(chunk))) => self.forward(chunk, sink.as_mut()).await?,
                Step::Ready(Some(Err(e))) => return Err(e.into()),
                Step::Ready(None) => break,
            }
        }

        if let Some(sink) = sink {
            let written = self.guarded(sink.finish()).await?;
            tracing::debug!(url = %url, bytes = written, "分流目标已写完");
        }

        tracing::info!(
            url = %url,
            bytes = self.relayed_bytes.get_current(),
            "传输完成"
        );
        Ok(())
    }

    /// 先写分流目标，再输出到中继流
    async fn forward(&mut self, chunk: Bytes, sink: Option<&mut FanOutSink>) -> Result<(), Halt> {
        if chunk.is_empty() {
            return Ok(());
        }
        if let Some(sink) = sink {
            self.guarded(sink.write(&chunk)).await?;
        }

        let len = chunk.len() as u64;
        self.emit(RelayEvent::Data(chunk)).await?;
        self.relayed_bytes.update_field(|b| *b += len);
        Ok(())
    }

    /// 等待输出通道有空位再发送；等待期间仍响应控制命令。
    async fn emit(&mut self, event: RelayEvent) -> Result<(), Halt> {
        loop {
            let step = tokio::select! {
                biased;
                cmd = next_command(&mut self.commands, &self.events) => Step::Command(cmd),
                permit = self.events.reserve() => Step::Ready(permit),
            };
            match step {
                Step::Command(cmd) => apply(cmd, &mut self.paused)?,
                Step::Ready(Ok(permit)) => {
                    permit.send(event);
                    return Ok(());
                }
                Step::Ready(Err(_)) => return Err(RelayError::StreamClosed.into()),
            }
        }
    }

    /// 等待分流目标的操作，期间仍响应控制命令。中止时直接丢弃未完成的操作。
    async fn guarded<T>(
        &mut self,
        operation: impl Future<Output = Result<T, RelayError>>,
    ) -> Result<T, Halt> {
        tokio::pin!(operation);
        loop {
            let step = tokio::select! {
                biased;
                cmd = next_command(&mut self.commands, &self.events) => Step::Command(cmd),
                result = &mut operation => Step::Ready(result),
            };
            match step {
                Step::Command(cmd) => apply(cmd, &mut self.paused)?,
                Step::Ready(result) => return Ok(result?),
            }
        }
    }

    fn set_status(&self, status: RelayStatus) {
        tracing::trace!(url = %self.url, status = %status, "状态变化");
        self.status.update(status);
    }
}

/// 等待下一条控制命令；输出流被丢弃或控制句柄全部销毁时返回 `None`。
async fn next_command(
    commands: &mut QueueReactiveConsumer<ControlCommand>,
    events: &mpsc::Sender<RelayEvent>,
) -> Option<ControlCommand> {
    tokio::select! {
        cmd = commands.recv() => cmd,
        _ = events.closed() => None,
    }
}

/// 处理一条控制命令，`None` 视为输出流关闭。
fn apply(command: Option<ControlCommand>, paused: &mut bool) -> Result<(), Halt> {
    match command {
        Some(ControlCommand::Abort) => Err(Halt::Aborted),
        Some(ControlCommand::Pause) => {
            tracing::debug!("暂停读取响应");
            *paused = true;
            Ok(())
        }
        Some(ControlCommand::Resume) => {
            tracing::debug!("恢复读取响应");
            *paused = false;
            Ok(())
        }
        None => Err(Halt::Failed(RelayError::StreamClosed)),
    }
}
