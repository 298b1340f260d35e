//! MCP servers for safe arithmetic evaluation and shell command execution.

pub mod config;
pub mod error;
pub mod eval;
pub mod executor;
pub mod request;
pub mod serve;
pub mod server;
pub mod tools;

pub use error::ToolError;
pub use server::{CalculatorServer, ShellServer};
