use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use core::time::Duration;
use std::net::SocketAddr;

/// Largest accepted artificial delay. Anything beyond this is almost
/// certainly a unit mistake (seconds vs. milliseconds).
pub const MAX_DELAY_MS: u64 = 10 * 60 * 1_000;

/// Output format for the console log layer.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Runtime configuration for the `hashkeep-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is loaded first, if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "hashkeep-server",
    version,
    about = "An HTTP service for asynchronous SHA-512 password digests"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:8080"))]
    pub server_addr: String,

    /// Milliseconds to wait before hashing, on both the synchronous and the
    /// asynchronous path.
    ///
    /// Environment variable: `HASH_DELAY_MS`
    #[arg(long, env = "HASH_DELAY_MS", default_value_t = 5_000)]
    pub delay_ms: u64,

    /// Seconds to wait for in-flight requests, and then again for in-flight
    /// digest jobs, once shutdown begins. Work still running afterwards is
    /// abandoned.
    ///
    /// Environment variable: `SHUTDOWN_GRACE_SECS`
    #[arg(long, env = "SHUTDOWN_GRACE_SECS", default_value_t = 10)]
    pub shutdown_grace_secs: u64,

    /// Console log format. Filtering is controlled by `RUST_LOG`.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: SocketAddr,
    pub delay: Duration,
    pub shutdown_grace: Duration,
    pub log_format: LogFormat,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let server_addr: SocketAddr = args
            .server_addr
            .parse()
            .with_context(|| format!("SERVER_ADDR ({}) is not a socket address", args.server_addr))?;

        if args.delay_ms > MAX_DELAY_MS {
            bail!(
                "HASH_DELAY_MS ({}) exceeds the maximum allowed ({})",
                args.delay_ms,
                MAX_DELAY_MS
            );
        }

        Ok(Self {
            server_addr,
            delay: Duration::from_millis(args.delay_ms),
            shutdown_grace: Duration::from_secs(args.shutdown_grace_secs),
            log_format: args.log_format,
        })
    }
}
