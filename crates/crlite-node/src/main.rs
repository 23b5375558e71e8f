//! # CRLite Node
//!
//! ```text
//! crlite-node check example.com https://github.com/
//! echo expired.badssl.com | crlite-node watch
//! crlite-node decide 04E1A73C0D5B2F11A5E1C3F7D2B8A901
//! ```
//!
//! Reports go to stdout (one per line, JSON with `--json`), logs to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crlite_cascade::RevocationApi;
use crlite_node::{init_logging, CheckReport, NodeConfig, RevocationRuntime};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "crlite-node")]
#[command(about = "Certificate revocation checks backed by a CRLite filter cascade")]
struct Args {
    /// Revocation backend base URL (overrides CRLITE_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Cascade document path (overrides CRLITE_CASCADE_PATH)
    #[arg(long, global = true)]
    cascade: Option<PathBuf>,

    /// Only block expired certificates
    #[arg(long, global = true)]
    no_block_revoked: bool,

    /// JSON reports and JSON logs
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the certificate served for each domain or URL
    Check {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Check domains read line by line from stdin until EOF or Ctrl+C
    Watch,
    /// Classify serial numbers with the cascade only (no network)
    Decide {
        #[arg(required = true)]
        serials: Vec<String>,
    },
}

fn load_config(args: &Args) -> NodeConfig {
    let mut config = NodeConfig::from_env();

    if let Some(base) = &args.api_base {
        config.api.base_url = base.clone();
    }
    if let Some(path) = &args.cascade {
        config.cascade.path = Some(path.clone());
    }
    if args.no_block_revoked {
        config.policy.block_revoked = false;
    }
    if args.json {
        config.logging.json = true;
    }

    config
}

fn print_report(report: &CheckReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args);

    init_logging(&config.logging).context("Failed to initialise logging")?;

    let runtime = RevocationRuntime::new(config)?;

    match args.command {
        Command::Decide { serials } => {
            runtime.load_cascade().await;
            for serial in &serials {
                let verdict = runtime.engine().decide(serial);
                if args.json {
                    println!(
                        "{}",
                        serde_json::json!({ "serial": serial, "verdict": verdict })
                    );
                } else {
                    println!("{}  {}", serial, verdict);
                }
            }
            return Ok(());
        }
        Command::Check { domains } => {
            runtime.start().await?;
            for domain in &domains {
                let report = runtime.check_domain(domain).await;
                print_report(&report, args.json)?;
            }
        }
        Command::Watch => {
            runtime.start().await?;
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                tokio::select! {
                    line = lines.next_line() => {
                        let Some(line) = line.context("Failed to read stdin")? else {
                            break;
                        };
                        if line.trim().is_empty() {
                            continue;
                        }
                        let report = runtime.check_domain(&line).await;
                        print_report(&report, args.json)?;
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("Received Ctrl+C");
                        break;
                    }
                }
            }
        }
    }

    runtime.shutdown().await;
    Ok(())
}
