//! Command implementations.

pub mod analyze;
pub mod chunks;
pub mod config;
pub mod extract;

pub use self::analyze::execute_analyze;
pub use self::chunks::execute_chunks;
pub use self::config::execute_config;
pub use self::extract::execute_extract;
