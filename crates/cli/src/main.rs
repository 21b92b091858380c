//! Bakery cart CLI - inspect and edit a persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! bakery-cart show
//!
//! # Add two 8-inch vanilla cakes
//! bakery-cart add product cake-1 --size 8in --price 30 --qty 2 --name "Vanilla cake"
//!
//! # Add a combo deal
//! bakery-cart add combo brunch-box --price 42.50
//!
//! # Change the quantity of the first line, then remove the second
//! bakery-cart set-qty 0 3
//! bakery-cart remove 1
//!
//! # Empty the cart
//! bakery-cart clear
//! ```
//!
//! # Commands
//!
//! - `show` - Print lines, item count and subtotal
//! - `add product|combo` - Add merchandise, merging with a matching line
//! - `remove` - Remove a line by position
//! - `set-qty` - Overwrite a line's quantity (below 1 removes it)
//! - `clear` - Empty the cart
//! - `count` / `total` - Print the navbar badge count or the subtotal
//!
//! The cart slot location comes from `BAKERY_CART_DIR` / `BAKERY_CART_KEY`
//! (or `--dir` / `--key`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bakery_core::{ComboId, ProductId};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "bakery_cli=info,bakery_cart=info";

#[derive(Parser)]
#[command(name = "bakery-cart")]
#[command(author, version, about = "Bakery storefront cart tools")]
struct Cli {
    /// Directory holding the cart slot (overrides `BAKERY_CART_DIR`)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Name of the cart slot (overrides `BAKERY_CART_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart contents
    Show,
    /// Add merchandise to the cart
    Add {
        #[command(subcommand)]
        target: AddTarget,
    },
    /// Remove the line at a position
    Remove {
        /// Zero-based line position
        index: usize,
    },
    /// Set the quantity of the line at a position
    SetQty {
        /// Zero-based line position
        index: usize,
        /// New quantity; below 1 removes the line
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
    /// Print the total number of items
    Count,
    /// Print the cart subtotal
    Total,
}

#[derive(Subcommand)]
enum AddTarget {
    /// Add a catalog product
    Product {
        /// Product ID
        id: ProductId,

        /// Size variant (e.g. 8in)
        #[arg(short, long)]
        size: Option<String>,

        #[command(flatten)]
        line: LineArgs,
    },
    /// Add a combo deal
    Combo {
        /// Combo ID
        id: ComboId,

        #[command(flatten)]
        line: LineArgs,
    },
}

#[derive(clap::Args)]
struct LineArgs {
    /// Unit price
    #[arg(short, long)]
    price: Decimal,

    /// Quantity to add (default 1)
    #[arg(short, long, allow_negative_numbers = true)]
    qty: Option<i64>,

    /// Display name
    #[arg(short, long)]
    name: Option<String>,

    /// Image reference
    #[arg(short, long)]
    image: Option<String>,
}

fn main() {
    // Logs go to stderr so command output on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = bakery_cart::CartConfig::from_env()?;
    if let Some(dir) = cli.dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.key {
        config.slot_key = key;
    }

    let mut cart = commands::cart::open(&config)?;

    let output = match cli.command {
        Commands::Show => commands::cart::show(&cart, config.currency),
        Commands::Add { target } => {
            let input = match target {
                AddTarget::Product { id, size, line } => {
                    let input = line.apply(bakery_cart::CartLineInput::product(id, line.price));
                    match size {
                        Some(size) => input.with_size(size),
                        None => input,
                    }
                }
                AddTarget::Combo { id, line } => {
                    line.apply(bakery_cart::CartLineInput::combo(id, line.price))
                }
            };
            commands::cart::add(&mut cart, input, config.currency)?
        }
        Commands::Remove { index } => commands::cart::remove(&mut cart, index, config.currency)?,
        Commands::SetQty { index, quantity } => {
            commands::cart::set_quantity(&mut cart, index, quantity, config.currency)?
        }
        Commands::Clear => commands::cart::clear(&mut cart)?,
        Commands::Count => cart.count().to_string(),
        Commands::Total => bakery_core::Price::new(cart.total(), config.currency).display(),
    };

    commands::emit(&output);
    Ok(())
}

impl LineArgs {
    fn apply(&self, mut input: bakery_cart::CartLineInput) -> bakery_cart::CartLineInput {
        input.quantity = self.qty;
        input.name.clone_from(&self.name);
        input.image.clone_from(&self.image);
        input
    }
}
