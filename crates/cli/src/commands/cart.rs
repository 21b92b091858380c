//! Cart commands.
//!
//! Every command opens the file-backed cart named by the configuration,
//! applies at most one mutation and returns the text to print.
//!
//! # Environment Variables
//!
//! - `BAKERY_CART_DIR` - Directory holding the cart slot
//! - `BAKERY_CART_KEY` - Name of the cart slot
//! - `BAKERY_CURRENCY` - Display currency

use std::fmt::Write as _;

use bakery_cart::storage::validate_key;
use bakery_cart::{
    CartConfig, CartLineInput, CartStore, CartView, FileStorage, LoadOutcome, PersistError,
    StorageError,
};
use bakery_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The configured slot key cannot be used.
    #[error("Invalid cart slot: {0}")]
    InvalidSlot(#[from] StorageError),

    /// Unit prices must be zero or more.
    #[error("Unit price cannot be negative: {0}")]
    NegativePrice(Decimal),

    /// The cart was changed but could not be saved.
    #[error("Failed to save cart: {0}")]
    Persist(#[from] PersistError),
}

/// Open the cart configured in `config`.
///
/// An unreadable saved cart is reported and replaced by an empty one.
///
/// # Errors
///
/// Returns an error if the slot key is not usable as a file name.
#[instrument(skip(config), fields(dir = %config.storage_dir.display(), key = %config.slot_key))]
pub fn open(config: &CartConfig) -> Result<CartStore<FileStorage>, CartCommandError> {
    validate_key(&config.slot_key)?;

    let (cart, outcome) = CartStore::open(config.file_storage(), config.slot_key.clone());
    match outcome {
        LoadOutcome::Restored { lines } => info!(lines, "Loaded cart"),
        LoadOutcome::Absent => info!("Starting a new cart"),
        LoadOutcome::Reset(e) => warn!("Saved cart was unreadable and has been reset: {e}"),
    }
    Ok(cart)
}

/// Render the cart contents.
#[must_use]
pub fn show(cart: &CartStore<FileStorage>, currency: CurrencyCode) -> String {
    render(&CartView::new(cart, currency))
}

/// Add merchandise and render the updated cart.
///
/// # Errors
///
/// Returns an error if the price is negative or the cart cannot be saved.
#[instrument(skip_all, fields(id = %input.merchandise.id()))]
pub fn add(
    cart: &mut CartStore<FileStorage>,
    input: CartLineInput,
    currency: CurrencyCode,
) -> Result<String, CartCommandError> {
    if input.unit_price < Decimal::ZERO {
        return Err(CartCommandError::NegativePrice(input.unit_price));
    }

    let quantity = input.requested_quantity();
    cart.add(input)?;
    info!(quantity, count = cart.count(), "Added to cart");

    Ok(show(cart, currency))
}

/// Remove a line and render the updated cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[instrument(skip(cart, currency))]
pub fn remove(
    cart: &mut CartStore<FileStorage>,
    index: usize,
    currency: CurrencyCode,
) -> Result<String, CartCommandError> {
    if index >= cart.len() {
        warn!(len = cart.len(), "No line at this position");
    }
    cart.remove(index)?;
    Ok(show(cart, currency))
}

/// Set a line's quantity and render the updated cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[instrument(skip(cart, currency))]
pub fn set_quantity(
    cart: &mut CartStore<FileStorage>,
    index: usize,
    quantity: i64,
    currency: CurrencyCode,
) -> Result<String, CartCommandError> {
    if index >= cart.len() {
        warn!(len = cart.len(), "No line at this position");
    }
    cart.set_quantity(index, quantity)?;
    Ok(show(cart, currency))
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[instrument(skip_all)]
pub fn clear(cart: &mut CartStore<FileStorage>) -> Result<String, CartCommandError> {
    cart.clear()?;
    Ok("Cart cleared".to_string())
}

fn render(view: &CartView) -> String {
    if view.is_empty() {
        return format!("Cart is empty\nSubtotal: {}", view.subtotal);
    }

    let mut out = String::new();
    for item in &view.items {
        let title = match &item.size {
            Some(size) => format!("{} ({size})", item.title),
            None => item.title.clone(),
        };
        let _ = writeln!(
            out,
            "[{}] {title} x{} @ {} = {}",
            item.index, item.quantity, item.price, item.line_price
        );
    }
    let _ = write!(
        out,
        "Items: {}\nSubtotal: {}",
        view.item_count, view.subtotal
    );
    out
}
