//! HTTP 客户端协作方：发起请求、返回状态码/响应头/响应体流。
//!
//! 中继只依赖 [`traits::HttpClient`]，默认实现为基于 reqwest 的 [`structs::ReqwestClient`]。

pub mod structs;
pub mod traits;
