//! 测试模块入口：公共逻辑在 `lib` 子模块，各组测试在 `internal`。

#[cfg(test)]
pub use lib::*;
