use clap::Parser;

use calc_shell_mcp::config::ServeArgs;
use calc_shell_mcp::serve::{init_logging, serve};
use calc_shell_mcp::CalculatorServer;

const DEFAULT_PORT: u16 = 8000;

#[derive(Parser, Debug)]
#[command(name = "calculator-server")]
#[command(about = "MCP server that evaluates arithmetic expressions")]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    serve::<CalculatorServer>("calculator-server", &cli.serve, DEFAULT_PORT).await
}
