use clap::Parser;
use morocco_weather_mcp::client::{McpClient, WeatherApp};
use morocco_weather_mcp::config::{init_tracing, DEFAULT_SERVER_URL};
use tokio::io::BufReader;

/// Interactive client for the Morocco weather MCP server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the server
    #[arg(default_value = DEFAULT_SERVER_URL)]
    server_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("warn");
    let args = Args::parse();

    let client = McpClient::new(args.server_url)?;
    let mut app = WeatherApp::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    app.run(stdin, &mut stdout).await?;

    Ok(())
}
