pub mod classify;
pub mod entrance;
pub mod http;
pub mod relay;
pub mod states;
