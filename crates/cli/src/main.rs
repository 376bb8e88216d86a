//! Basket CLI - Cart and wishlist from the terminal.
//!
//! Plays the part of the browser: opening a view with a location adds the
//! product named in its query, and the lists persist in a local storage file
//! between runs.
//!
//! # Usage
//!
//! ```bash
//! # Open the cart with a product in the query
//! basket cart open "/cart?name=Shirt&price=500&description=Cotton&image=/shirt.png"
//!
//! # Add a product to the wishlist
//! basket wishlist add --name Hat --price 20 --description Wool --image /hat.png
//!
//! # Use a different storage file
//! basket --storage /tmp/basket.json cart show
//! ```
//!
//! # Commands
//!
//! - `cart` - `open`, `add`, `show`, `quantity`, `remove`, `total`
//! - `wishlist` - `open`, `add`, `show`, `remove`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod view;

use commands::ProductArgs;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "basket")]
#[command(author, version, about = "Cart and wishlist tools")]
struct Cli {
    /// Local storage file (overrides `BASKET_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Open the cart at a location, adding the product in its query
    Open {
        /// Location such as "/cart?name=...&price=...&description=...&image=..."
        #[arg(default_value = commands::cart::CART_LOCATION)]
        location: String,
    },
    /// Add a product to the cart
    Add(ProductArgs),
    /// Show the cart
    Show,
    /// Set the quantity of a line (values below 1 are ignored)
    Quantity {
        /// Line index, starting at 0
        index: usize,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Line index, starting at 0
        index: usize,
    },
    /// Print the cart total
    Total,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Open the wishlist at a location, adding the product in its query
    Open {
        /// Location such as "/wishlist?name=...&price=...&description=...&image=..."
        #[arg(default_value = commands::wishlist::WISHLIST_LOCATION)]
        location: String,
    },
    /// Add a product to the wishlist
    Add(ProductArgs),
    /// Show the wishlist
    Show,
    /// Remove an entry
    Remove {
        /// Entry index, starting at 0
        index: usize,
    },
}

fn main() {
    // Logs go to stderr so stdout carries only the rendered view
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                println!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = CliConfig::from_env()?;
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }

    let output = match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Open { location } => commands::cart::open(&config, &location)?,
            CartAction::Add(product) => commands::cart::add(&config, product)?,
            CartAction::Show => commands::cart::show(&config)?,
            CartAction::Quantity { index, quantity } => {
                commands::cart::set_quantity(&config, index, quantity)?
            }
            CartAction::Remove { index } => commands::cart::remove(&config, index)?,
            CartAction::Total => commands::cart::total(&config)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Open { location } => commands::wishlist::open(&config, &location)?,
            WishlistAction::Add(product) => commands::wishlist::add(&config, product)?,
            WishlistAction::Show => commands::wishlist::show(&config),
            WishlistAction::Remove { index } => commands::wishlist::remove(&config, index)?,
        },
    };
    Ok(output)
}
