pub mod control_command;
pub mod fan_out_sink;
pub mod prefixed_stream;
pub mod relay_controller;
pub mod relay_error;
pub mod relay_event;
pub mod relay_status;
pub mod relay_stream;
pub mod target;
pub mod transfer_options;

// 重导出公共类型
pub use control_command::ControlCommand;
pub use prefixed_stream::PrefixedStream;
pub use relay_controller::RelayController;
pub use relay_error::RelayError;
pub use relay_event::RelayEvent;
pub use relay_status::RelayStatus;
pub use relay_stream::RelayStream;
pub use target::{Destination, Target};
pub use transfer_options::TransferOptions;
