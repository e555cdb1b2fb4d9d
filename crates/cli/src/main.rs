//! Sweet Meraki CLI - database migrations and account management.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! sm-cli migrate
//!
//! # Create an account
//! sm-cli user create -e admin@sweermeraki.com -p 'a long passphrase'
//!
//! # Reset a password
//! sm-cli user set-password -e someone@example.com -p 'another passphrase'
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sm-cli")]
#[command(author, version, about = "Sweet Meraki CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage customer and admin accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new account
    Create {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Replace an account's password
    SetPassword {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// New password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create { email, password } => {
                commands::user::create(&email, &password).await?;
            }
            UserAction::SetPassword { email, password } => {
                commands::user::set_password(&email, &password).await?;
            }
        },
    }
    Ok(())
}
