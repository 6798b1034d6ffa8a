//! vdx - Command-line client for VDX time-series servers
//!
//! Provides both an interactive console and one-shot query execution.

mod commands;
mod repl;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vdx_client::{ConnectionConfig, VdxClient};
use vdx_protocol::DEFAULT_PORT;

#[derive(Parser)]
#[command(name = "vdx")]
#[command(about = "Command-line client for VDX geophysical data servers")]
#[command(version)]
struct Cli {
    /// Server address as host[:port]
    #[arg(short, long, default_value = "localhost:16050", env = "VDX_SERVER")]
    server: String,

    /// Read timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Attempts per query before giving up
    #[arg(long, default_value = "3")]
    tries: u32,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive console
    Repl,

    /// Run a text query and print the returned lines
    Text {
        /// Query parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// Run a binary query and summarize the decoded dataset
    Binary {
        /// Query parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// List the channels of a data source
    Channels {
        /// Data source name
        source: String,

        /// Print the channels as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let (host, port) = parse_server(&cli.server)?;
    tracing::info!("Using VDX server {}:{}", host, port);
    tracing::info!("  Read timeout: {}s, attempt budget: {}", cli.timeout, cli.tries);
    let config = ConnectionConfig::new(host, port)
        .with_read_timeout(Duration::from_secs(cli.timeout));
    let client = VdxClient::new(config).with_max_tries(cli.tries);

    match cli.command {
        Some(Commands::Repl) | None => {
            repl::run(client, &cli.server).await?;
        }
        Some(cmd) => {
            let mut client = client;

            // Connect up front so a dead server fails with a clear message
            // instead of a retry-wrapped one.
            if let Err(e) = client.connect().await {
                tracing::error!("Connection to {} failed: {}", cli.server, e);
                eprintln!("{}: {}", "Connection failed".red(), e);
                std::process::exit(1);
            }

            match commands::execute(&mut client, cmd).await {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    tracing::error!("Command failed: {}", e);
                    eprintln!("{}: {}", "Error".red(), e);
                    std::process::exit(1);
                }
            }

            client.close().await;
        }
    }

    Ok(())
}

/// Splits `host[:port]`, defaulting to the standard VDX port.
///
/// IPv6 literals must be bracketed: `[::1]` or `[::1]:16050`.
fn parse_server(server: &str) -> Result<(String, u16), Box<dyn std::error::Error>> {
    if let Some(rest) = server.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| format!("invalid server address {:?}", server))?;
        if host.is_empty() {
            return Err(format!("invalid server address {:?}", server).into());
        }
        return match tail.strip_prefix(':') {
            Some(port) => {
                let port = port
                    .parse()
                    .map_err(|_| format!("invalid port in server address {:?}", server))?;
                Ok((host.to_string(), port))
            }
            None if tail.is_empty() => Ok((host.to_string(), DEFAULT_PORT)),
            None => Err(format!("invalid server address {:?}", server).into()),
        };
    }
    if server.matches(':').count() > 1 {
        return Err(format!(
            "invalid server address {:?} (bracket IPv6 literals as [addr]:port)",
            server
        )
        .into());
    }
    match server.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => {
            let port = port
                .parse()
                .map_err(|_| format!("invalid port in server address {:?}", server))?;
            Ok((host.to_string(), port))
        }
        Some(_) => Err(format!("invalid server address {:?}", server).into()),
        None => Ok((server.to_string(), DEFAULT_PORT)),
    }
}
