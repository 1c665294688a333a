//! Paperback CLI - a shell around the storefront core.
//!
//! # Usage
//!
//! ```bash
//! # Browse and shop
//! pb catalog
//! pb cart add 1
//! pb cart show
//! pb checkout --name "Amara Chen" --address "12 Harbour St" --city Kingston --amount 500
//! pb invoice
//!
//! # Accounts
//! pb register --first-name Amara --last-name Chen --dob 1990-03-14 \
//!     --email amara@example.com --trn 987654321 --password hunter2!
//! pb login --username 987654321 --password hunter2!
//! pb logout
//! ```
//!
//! The shell owns all rendering; the store crate only returns data and
//! typed errors. State lives in the JSON data file named by
//! `PAPERBACK_DATA_FILE` (default `paperback.json`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use paperback_store::catalog::Catalog;
use paperback_store::config::StoreConfig;
use paperback_store::storage::FileStorage;

mod commands;

#[derive(Parser)]
#[command(name = "pb")]
#[command(author, version, about = "Paperback storefront shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Catalog,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Check out the current cart
    Checkout {
        /// Customer name
        #[arg(long)]
        name: String,

        /// Shipping street address
        #[arg(long)]
        address: String,

        /// Shipping city
        #[arg(long)]
        city: String,

        /// Amount tendered
        #[arg(long)]
        amount: String,
    },
    /// Show the invoice for the last order
    Invoice,
    /// Register a new account
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        dob: String,

        #[arg(long)]
        email: String,

        /// 9-digit TRN; doubles as the username
        #[arg(long)]
        trn: String,

        #[arg(long)]
        password: String,

        /// Defaults to the password when omitted
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Log in
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show who is logged in
    Whoami,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product by ID
    Add { product_id: i32 },
    /// Show the cart with its totals
    Show,
    /// Empty the cart
    Clear,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paperback=info".into()),
        )
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run();

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = StoreConfig::from_env()?;
    let path = config
        .data_file
        .clone()
        .unwrap_or_else(|| "paperback.json".into());
    let storage = FileStorage::open(path)?;
    let catalog = Catalog::builtin();

    match cli.command {
        Commands::Catalog => commands::shop::catalog(&catalog),
        Commands::Cart { action } => match action {
            CartAction::Add { product_id } => {
                commands::shop::cart_add(&storage, &catalog, product_id)?;
            }
            CartAction::Show => commands::shop::cart_show(&storage, &catalog, config.pricing)?,
            CartAction::Clear => commands::shop::cart_clear(&storage)?,
        },
        Commands::Checkout {
            name,
            address,
            city,
            amount,
        } => commands::shop::checkout(
            &storage,
            &catalog,
            config.pricing,
            name,
            address,
            city,
            amount,
        )?,
        Commands::Invoice => commands::shop::invoice(&storage, &catalog, config.pricing)?,
        Commands::Register {
            first_name,
            last_name,
            dob,
            email,
            trn,
            password,
            confirm_password,
        } => commands::account::register(
            &storage,
            first_name,
            last_name,
            dob,
            email,
            trn,
            password,
            confirm_password,
        )?,
        Commands::Login { username, password } => {
            commands::account::login(&storage, config.lockout, &username, &password)?;
        }
        Commands::Logout => commands::account::logout(&storage, config.lockout)?,
        Commands::Whoami => commands::account::whoami(&storage, config.lockout)?,
    }
    Ok(())
}
