//! Delivery CLI - database migrations and one-off fee quotes.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! delivery-cli migrate
//!
//! # Quote the delivery fee for a CEP against ViaCEP
//! delivery-cli quote 04851-280
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run the server's bundled migrations
//! - `quote` - Resolve a CEP and print the fee quote as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "delivery-cli")]
#[command(author, version, about = "Delivery backend CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Quote the delivery fee for a CEP
    Quote {
        /// CEP, with or without the hyphen (e.g. 04851-280)
        cep: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delivery_cli=info,delivery_server=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Quote { cep } => commands::quote::run(&cep).await?,
    }
    Ok(())
}
