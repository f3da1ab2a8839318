//! 中继领域模块：窥探首块、类型闸门、回填首块并转入透传。
//!
//! 使用方式：`downldr.transfer(url, TransferOptions::new().filter(f)).next().await`
//! 对外导出以 [`crate::relay`] 为准，此处仅做模块划分。

pub mod functions;
pub mod structs;
pub mod traits;
