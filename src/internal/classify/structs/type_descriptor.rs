use serde::{Deserialize, Serialize};

use super::detected_type::DetectedType;

/// 传输的类型描述，在通过类型闸门后随 `Type` 事件发出。
///
/// - `content_type` 总是取自响应头（响应头缺失时为 `None`）
/// - `mime` / `ext` 仅在魔数识别成功时存在
///
/// 构造后不可修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    mime: Option<String>,
    ext: Option<String>,
    content_type: Option<String>,
}

impl TypeDescriptor {
    pub fn new(
        mime: Option<String>,
        ext: Option<String>,
        content_type: Option<String>,
    ) -> Self {
        Self {
            mime,
            ext,
            content_type,
        }
    }

    /// 由响应头与识别结果合成：识别结果存在时覆盖 mime / ext。
    pub fn from_parts(
        detected: Option<DetectedType>,
        content_type: Option<String>,
    ) -> Self {
        match detected {
            Some(d) => Self::new(Some(d.mime), Some(d.ext), content_type),
            None => Self::new(None, None, content_type),
        }
    }

    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    pub fn ext(&self) -> Option<&str> {
        self.ext.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// 优先 mime，其次响应头声明的类型，都没有时为 `"unknown"`。
    pub fn resolved(&self) -> &str {
        self.mime()
            .or(self.content_type())
            .unwrap_or("unknown")
    }

    /// 是否由魔数识别得出
    pub fn is_detected(&self) -> bool {
        self.mime.is_some()
    }
}
