use card_auth_gateway::application::gateway::PaymentGateway;
use card_auth_gateway::config::GatewayConfig;
use card_auth_gateway::interfaces::batch::BatchRunner;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV script of authorize/capture/refund/void commands
    input: PathBuf,

    /// JSON configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated card network round-trip, in milliseconds
    #[arg(long)]
    settlement_latency_ms: Option<u64>,

    /// Give up on a settlement call after this many milliseconds
    #[arg(long)]
    settlement_timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GatewayConfig::from_json_file(path).into_diagnostic()?,
        None => GatewayConfig::default(),
    };
    if let Some(latency) = cli.settlement_latency_ms {
        config.settlement_latency_ms = latency;
    }
    if cli.settlement_timeout_ms.is_some() {
        config.settlement_timeout_ms = cli.settlement_timeout_ms;
    }

    let gateway = PaymentGateway::from_config(&config);

    // Process commands
    let file = File::open(&cli.input).into_diagnostic()?;
    let mut runner = BatchRunner::new();
    runner.run(&gateway, file).await.into_diagnostic()?;

    // Output final state
    let stdout = io::stdout();
    runner
        .report(&gateway, stdout.lock())
        .await
        .into_diagnostic()?;

    Ok(())
}
