pub mod queue_reactive;
pub mod reactive_core;
