/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口
pub use internal::entrance::downldr::*;
pub use internal::entrance::transfer::*;

/// 常用类型，直接从根导出
pub use internal::classify::structs::TypeDescriptor;
pub use internal::relay::structs::{RelayError, RelayEvent, RelayStream, Target, TransferOptions};

/// 类型识别：内置魔数表，也可以实现 `TypeClassifier` 自行替换
pub mod classify {
    use crate::internal;
    pub use internal::classify::structs::*;
    pub use internal::classify::traits::*;
}

/// HTTP 协作方：默认 reqwest 实现与客户端配置，自定义客户端实现 `HttpClient` 即可
pub mod http {
    use crate::internal;
    pub use internal::http::structs::*;
    pub use internal::http::traits::*;
}

pub mod relay {
    pub mod functions {
        use crate::internal;
        pub use internal::relay::functions::completion::*;
        pub use internal::relay::functions::type_gate::*;
    }

    pub mod structs {
        use crate::internal;
        pub use internal::relay::structs::*;
    }

    pub mod traits {
        use crate::internal;
        pub use internal::relay::traits::*;
    }

    pub use functions::*;
    pub use structs::*;
    pub use traits::*;
}

pub mod states {
    pub mod reactive_core {
        use crate::internal;
        pub use internal::states::reactive_core::*;
    }
}
