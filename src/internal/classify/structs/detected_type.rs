/// 魔数识别结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedType {
    pub mime: String,
    /// 扩展名，不带前导点
    pub ext: String,
}

impl DetectedType {
    pub fn new(mime: impl Into<String>, ext: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            ext: ext.into(),
        }
    }
}
