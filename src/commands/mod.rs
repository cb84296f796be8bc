//! CLI commands

pub mod clean;
pub mod delete;
pub mod init;
pub mod list;
pub mod new;
pub mod preview;
pub mod session;
pub mod show;
