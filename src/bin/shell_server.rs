use clap::Parser;

use calc_shell_mcp::config::ServeArgs;
use calc_shell_mcp::serve::{init_logging, serve};
use calc_shell_mcp::ShellServer;

const DEFAULT_PORT: u16 = 8080;

#[derive(Parser, Debug)]
#[command(name = "shell-server")]
#[command(about = "MCP server that runs shell commands on behalf of a trusted caller")]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    serve::<ShellServer>("shell-server", &cli.serve, DEFAULT_PORT).await
}
