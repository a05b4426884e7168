//! CLI command implementations.

pub mod backup;
pub mod block;
pub mod init;
pub mod resume;
pub mod status;
pub mod suspend;
pub mod update;
pub mod whitelist;
