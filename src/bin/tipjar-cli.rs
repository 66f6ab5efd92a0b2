use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tipjar::account::{Account, PRIVATE_KEY_ENV_VAR};
use tipjar::config::{load_config, TipjarConfig};
use tipjar::observability::logging::{init_logging, LogFormat};
use tipjar::{NetworkType, TipjarService};

#[derive(Parser)]
#[command(name = "tipjar-cli")]
#[command(about = "Send and track ledger tips from the command line", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "tipjar.toml")]
    config: PathBuf,

    /// Log format: pretty or json.
    #[arg(long, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a tip to the configured recipient and wait for confirmation
    Send {
        /// Decimal amount in whole currency units, e.g. "1.5"
        #[arg(short, long)]
        amount: String,
        /// Message attached to the transfer
        #[arg(short, long, default_value = "")]
        message: String,
    },
    /// Show the currency balance of an address
    Balance {
        /// Address to query
        address: String,
    },
    /// List confirmed tips received by the configured recipient
    History {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Generate a fresh keypair and address
    GenerateKey {
        /// Network to derive the address for: testnet or mainnet
        #[arg(long, default_value = "testnet")]
        network: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging("info", LogFormat::from_str_lossy(&cli.log_format));

    let config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        tracing::warn!(path = %cli.config.display(), "Config file not found, using defaults");
        TipjarConfig::default()
    };

    match cli.command {
        Commands::Send { amount, message } => {
            let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
                format!("set {} to the signer's private key", PRIVATE_KEY_ENV_VAR)
            })?;

            let service = TipjarService::new(config)?;
            let outcome = service.send_tip(&private_key, &amount, &message).await?;

            println!("confirmed {}", outcome.hash);
            println!("height    {}", outcome.record.height);
            println!("uri       {}", outcome.uri);
        }
        Commands::Balance { address } => {
            let service = TipjarService::new(config)?;
            let balance = service.balance(&address).await?;
            println!("{}", balance);
        }
        Commands::History { page } => {
            let service = TipjarService::new(config)?;
            let records = service.history(page).await?;
            if records.is_empty() {
                println!("no confirmed transfers on page {}", page);
            }
            for record in records {
                let message = record.message.as_deref().unwrap_or("");
                println!("{}  height {}  {}", record.hash, record.height, message);
            }
        }
        Commands::GenerateKey { network } => {
            let network = match network.to_lowercase().as_str() {
                "mainnet" => NetworkType::Mainnet,
                "testnet" => NetworkType::Testnet,
                other => return Err(format!("unknown network '{}'", other).into()),
            };
            let account = Account::generate(network);
            println!("private key {}", account.private_key_hex());
            println!("public key  {}", account.public_key_hex());
            println!("address     {}", account.address());
        }
    }

    Ok(())
}
