use std::sync::Arc;

use crate::internal::classify::structs::TypeDescriptor;
use crate::internal::relay::traits::TypeFilter;

use super::target::Target;

/// 单次传输的选项。
///
/// ```ignore
/// let options = TransferOptions::new()
///     .filter(|t, _, _| t.mime() == Some("image/png"))
///     .target(Target::file_in("downloads", "avatar"));
/// ```
#[derive(Default)]
pub struct TransferOptions {
    /// 为 true 时不按状态码拒绝
    pub ignore_status: bool,
    /// 自定义判定，返回 false 即拒绝；未设置时全部接受
    pub filter: Option<Arc<dyn TypeFilter>>,
    /// 分流目标
    pub target: Option<Target>,
}

impl TransferOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_status(mut self, ignore_status: bool) -> Self {
        self.ignore_status = ignore_status;
        self
    }

    /// 以闭包设置过滤器，参数依次为类型描述、首块字节、状态码
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&TypeDescriptor, &[u8], u16) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// 以实现了 [`TypeFilter`] 的类型设置过滤器
    pub fn filter_with(mut self, filter: impl TypeFilter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }
}

impl std::fmt::Debug for TransferOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferOptions")
            .field("ignore_status", &self.ignore_status)
            .field("filter", &self.filter.as_ref().map(|_| "<filter>"))
            .field("target", &self.target)
            .finish()
    }
}
