//! CLI command implementations.
//!
//! - **analyze**: report `match` arms that drop the error in `Err(_)`
//! - **init**: write a default `.errdrop.toml`

pub mod analyze;
pub mod init;

pub use analyze::{analyze_project, handle_analyze, AnalyzeConfig};
pub use init::{init_config, init_config_in};
