//! System orchestration, configuration, startup, and shutdown logic.

pub mod catalog_system;
pub mod commands;
pub mod config;
pub mod tracing;

pub use self::catalog_system::*;
pub use self::commands::*;
pub use self::config::*;
pub use self::tracing::*;
