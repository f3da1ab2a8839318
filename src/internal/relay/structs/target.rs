//! 分流目标：判定通过后额外接收一份输出的写入端。

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::fs::File;
use tokio::io::AsyncWrite;

/// 分流写入端
pub type Destination = Box<dyn AsyncWrite + Send + Unpin>;

/// 按扩展名打开写入端的一次性工厂
pub type DestinationFactory =
    Box<dyn FnOnce(Option<String>) -> BoxFuture<'static, io::Result<Destination>> + Send>;

/// 分流目标，仅在类型闸门通过后解析一次。
pub enum Target {
    /// 固定写入端
    Fixed(Destination),
    /// 根据识别出的扩展名（未识别时为 `None`）选择写入端
    ByExtension(DestinationFactory),
}

impl Target {
    pub fn fixed(destination: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        Target::Fixed(Box::new(destination))
    }

    pub fn by_extension<F, Fut>(factory: F) -> Self
    where
        F: FnOnce(Option<String>) -> Fut + Send + 'static,
        Fut: Future<Output = io::Result<Destination>> + Send + 'static,
    {
        Target::ByExtension(Box::new(move |ext| factory(ext).boxed()))
    }

    /// 写入到指定文件；文件在判定通过后才创建，被拒绝的传输不会留下空文件。
    pub fn file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self::by_extension(move |_| open_file(path))
    }

    /// 写入到 `dir/stem.ext`，未识别出扩展名时写入 `dir/stem`。
    pub fn file_in(dir: impl AsRef<Path>, stem: &str) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let stem = stem.to_string();
        Self::by_extension(move |ext| {
            let name = match ext {
                Some(ext) => format!("{}.{}", stem, ext),
                None => stem,
            };
            open_file(dir.join(name))
        })
    }
}

async fn open_file(path: PathBuf) -> io::Result<Destination> {
    let file = File::create(&path).await?;
    Ok(Box::new(file) as Destination)
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Fixed(_) => f.write_str("Target::Fixed(..)"),
            Target::ByExtension(_) => f.write_str("Target::ByExtension(..)"),
        }
    }
}
