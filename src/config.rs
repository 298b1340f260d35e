use std::net::SocketAddr;

use clap::{Args, ValueEnum};
use thiserror::Error;

/// How the server talks to its MCP client
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// Stateless streamable HTTP
    Http,
}

/// Options that parse but cannot be served
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid MCP path \"{0}\": must start with '/', name a sub-path and contain no wildcards")]
    InvalidPath(String),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),
}

/// Command line and environment options shared by both servers
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Transport to serve MCP on
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value = "stdio")]
    pub transport: Transport,

    /// Address to bind when serving over HTTP
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind when serving over HTTP (defaults per server)
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// URL path the MCP endpoint is mounted on
    #[arg(long, env = "MCP_PATH", default_value = "/mcp")]
    pub path: String,
}

impl ServeArgs {
    /// Socket address for the HTTP transport
    pub fn bind_addr(&self, default_port: u16) -> Result<SocketAddr, ConfigError> {
        let port = self.port.unwrap_or(default_port);
        Ok(format!("{}:{}", self.host, port).parse()?)
    }

    /// Path the HTTP endpoint is nested under; the router cannot nest at the
    /// root or under a relative or wildcard path
    pub fn mount_path(&self) -> Result<&str, ConfigError> {
        let path = self.path.as_str();
        let valid = path.len() > 1
            && path.starts_with('/')
            && !path.ends_with('/')
            && !path.contains(['{', '}', '*', ':']);
        if valid {
            Ok(path)
        } else {
            Err(ConfigError::InvalidPath(path.to_string()))
        }
    }
}
