//! Tinymart CLI - Terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Interactive shop: register, login, browse, cart, checkout, admin
//! tinymart shell
//!
//! # Print the seeded catalog
//! tinymart catalog
//!
//! # Same, as JSON
//! tinymart catalog --json
//! ```
//!
//! # Commands
//!
//! - `shell` - Interactive storefront session on stdin/stdout
//! - `catalog` - Print every product grouped by category
//!
//! Configuration comes from `TINYMART_*` environment variables (see
//! `tinymart_storefront::config`). Logs go to stderr, filtered by `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tinymart_storefront::{StoreConfig, StoreState};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "tinymart")]
#[command(author, version, about = "Tinymart terminal storefront")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shopping session
    Shell,
    /// Print the catalog grouped by category
    Catalog {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber, writing to stderr so logs never mix with
/// shell output.
fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tinymart_storefront=info,tinymart_cli=info".into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let mut state = StoreState::new(config)?;

    match cli.command {
        Commands::Shell => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            commands::shell::Shell::new(&mut state, stdout.lock()).run(stdin.lock())?;
        }
        Commands::Catalog { json } => {
            let stdout = std::io::stdout();
            commands::catalog::print(&state, json, &mut stdout.lock())?;
        }
    }
    Ok(())
}
