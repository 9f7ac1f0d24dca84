//! Mode routing
//!
//! - Server mode (default, or `serve`)
//! - CLI mode (`config generate`)

pub mod cli;
pub mod server;

pub use cli::run_config_command;
pub use server::run_server;
