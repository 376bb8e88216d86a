//! Command implementations.
//!
//! Each command opens its store over the configured file storage, performs
//! one operation, and returns the text to print.

pub mod cart;
pub mod wishlist;

use basket_core::{FileStorage, Price, ProductCandidate};
use clap::Args;

use crate::config::CliConfig;

/// Product fields given directly on the command line.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product name
    #[arg(long)]
    pub name: String,

    /// Product price (decimal, e.g. 499.99)
    #[arg(long)]
    pub price: Price,

    /// Product description
    #[arg(long)]
    pub description: String,

    /// Image URL or path
    #[arg(long)]
    pub image: String,
}

impl From<ProductArgs> for ProductCandidate {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            price: args.price,
            description: args.description,
            image: args.image,
        }
    }
}

/// Open the file storage named by the configuration.
fn open_storage(config: &CliConfig) -> FileStorage {
    tracing::debug!(path = %config.storage_path.display(), "Opening local storage");
    FileStorage::new(&config.storage_path)
}

/// Append the "replace location" line when navigation parameters were consumed.
fn with_location(rendered: String, replace_location: Option<String>) -> String {
    match replace_location {
        Some(location) => format!("{rendered}\n\nLocation: {location}"),
        None => rendered,
    }
}
