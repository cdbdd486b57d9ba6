//! Bakehouse CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! bakehouse migrate
//!
//! # Create a staff account (prints a generated password if none given)
//! bakehouse staff create -u counter -r admin
//!
//! # List staff accounts
//! bakehouse staff list
//!
//! # Seed the initial super-admin and a sample catalog
//! bakehouse seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `staff create|list` - Manage staff accounts
//! - `seed` - Bootstrap the super-admin account and sample products

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bakehouse")]
#[command(author, version, about = "Bakehouse CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage staff accounts
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Seed the super-admin account and a sample catalog
    Seed,
}

#[derive(Subcommand)]
enum StaffAction {
    /// Create a new staff account
    Create {
        /// Username
        #[arg(short, long)]
        username: String,

        /// Password; a random one is generated and printed when omitted
        #[arg(short, long)]
        password: Option<String>,

        /// Role (`admin`, `super-admin`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
    /// List staff accounts
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

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
        Commands::Staff { action } => match action {
            StaffAction::Create {
                username,
                password,
                role,
            } => {
                commands::staff::create(&username, password.as_deref(), &role).await?;
            }
            StaffAction::List => commands::staff::list().await?,
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
