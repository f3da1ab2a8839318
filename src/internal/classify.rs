//! 类型识别领域模块：根据首块字节的魔数签名判断真实类型。
//!
//! 对外导出以 [`crate::classify`] 为准。

pub mod structs;
pub mod traits;
