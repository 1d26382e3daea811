//! Classifies a piece of text as a cryptocurrency address.
//!
//! # Usage
//!
//! ```bash
//! # Scan every supported chain
//! chainaddr 1BoatSLRHtKNngkdXEeobR76b53LETtpyT
//!
//! # Restrict to some chains and resolve domains for a token
//! chainaddr --chain polygon --chain tron --coin USDT --domains brad.crypto
//!
//! # Machine-readable output
//! chainaddr --json bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to TOML configuration file (default: `chainaddr.toml`)
//! - `ENS_RPC_URL` - Ethereum JSON-RPC endpoint used for ENS names
//! - `UDN_API_KEY` - Universal registry API key
//! - `RUST_LOG` - Log level filter (default: `warn`)

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chainaddr::{Address, Blockchain};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use chainaddr_resolver::{ChainScope, HandlerFactory, ResolverConfig};

/// Classify text as a validated, chain-specific address.
#[derive(Debug, Parser)]
#[command(name = "chainaddr", version, about)]
struct Cli {
    /// Blockchain uid to check (repeatable). Scans every chain when omitted.
    #[arg(short, long = "chain", value_name = "UID")]
    chains: Vec<Blockchain>,

    /// Token coin code looked up in the universal registry.
    #[arg(long, value_name = "CODE")]
    coin: Option<String>,

    /// Also resolve the text as a domain name.
    #[arg(long)]
    domains: bool,

    /// Configuration file.
    #[arg(long, env = "CONFIG", default_value = chainaddr_resolver::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// The text to classify.
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Outcome {
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    handler: Option<String>,
    address: Address,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("chainaddr failed: {e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether a handler accepted the text.
async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = ResolverConfig::load_from(&cli.config)?;
    let mut factory = HandlerFactory::from_config(&config)?.include_domains(cli.domains);

    let scope = ChainScope::from(cli.chains);
    let blockchains = scope.blockchains();
    if let Some(coin) = &cli.coin {
        for blockchain in &blockchains {
            factory = factory.with_coin_code(*blockchain, coin.clone());
        }
    }
    let chain = factory.chain_for_scope(&scope);
    tracing::info!(?scope, handlers = chain.len(), "Checking handlers");

    let outcome = match chain.first_match(&cli.text).await {
        Some(handler) => Outcome {
            matched: true,
            handler: Some(handler.kind().to_string()),
            address: handler.produce(&cli.text),
        },
        None => {
            let fallback = blockchains.first().copied().unwrap_or(Blockchain::Bitcoin);
            Outcome {
                matched: false,
                handler: None,
                address: Address::unvalidated(cli.text.as_str(), fallback),
            }
        }
    };

    let mut stdout = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &outcome)?;
        writeln!(stdout)?;
    } else {
        write_human(&mut stdout, &outcome)?;
    }
    Ok(outcome.matched)
}

fn write_human(out: &mut impl Write, outcome: &Outcome) -> io::Result<()> {
    let address = &outcome.address;
    match &outcome.handler {
        Some(kind) => writeln!(out, "{} ({kind})", address.blockchain().name())?,
        None => writeln!(out, "no match, unvalidated on {}", address.blockchain().name())?,
    }
    if let Some(script_type) = address.script_type() {
        writeln!(out, "script:  {script_type}")?;
    }
    if let Some(domain) = address.source_domain() {
        writeln!(out, "domain:  {domain}")?;
    }
    writeln!(out, "address: {}", address.resolved_value())
}
