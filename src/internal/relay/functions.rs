pub mod completion;
pub mod run_relay;
pub mod type_gate;
