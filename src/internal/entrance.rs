pub mod downldr;
pub mod transfer;
