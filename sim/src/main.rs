use std::net::IpAddr;
use std::process::ExitCode;

use clap::Parser;
use sim::SimServer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulated M-20iA guidance server", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port receiving motion and mode commands
    #[arg(long, default_value = "59002")]
    command_port: u16,

    /// Port sending joint telemetry
    #[arg(long, default_value = "59003")]
    telemetry_port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let server = match SimServer::bind(args.bind, args.command_port, args.telemetry_port).await {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to bind simulator: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Simulator listening on {} (command) and {} (telemetry)",
        args.command_port, args.telemetry_port
    );

    match server.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Simulator stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}
