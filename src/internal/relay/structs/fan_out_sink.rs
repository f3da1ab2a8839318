use tokio::io::AsyncWriteExt;

use super::relay_error::RelayError;
use super::target::{Destination, Target};

/// 已解析的分流写入端：接收输出流的每一块数据，`finish` 后才算完成。
pub(crate) struct FanOutSink {
    destination: Destination,
    written: u64,
}

impl FanOutSink {
    /// 解析目标。`ext` 为闸门识别出的扩展名，只在判定通过后调用。
    pub(crate) async fn open(target: Target, ext: Option<&str>) -> Result<Self, RelayError> {
        let destination = match target {
            Target::Fixed(destination) => destination,
            Target::ByExtension(factory) => factory(ext.map(str::to_owned))
                .await
                .map_err(RelayError::SinkOpen)?,
        };

        Ok(Self {
            destination,
            written: 0,
        })
    }

    pub(crate) async fn write(&mut self, chunk: &[u8]) -> Result<(), RelayError> {
        self.destination
            .write_all(chunk)
            .await
            .map_err(RelayError::SinkWrite)?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// 刷新并关闭写入端，返回写入的总字节数。
    pub(crate) async fn finish(mut self) -> Result<u64, RelayError> {
        self.destination
            .flush()
            .await
            .map_err(RelayError::SinkWrite)?;
        self.destination
            .shutdown()
            .await
            .map_err(RelayError::SinkWrite)?;
        Ok(self.written)
    }
}
