//! Integration tests for the bakery storefront cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bakery-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Merge rules, quantity floor and totals through the public API
//! - `cart_persistence` - Slot round-trips and corrupt-slot recovery on both backends
//!
//! This library holds the fixtures shared by the test files.

use bakery_cart::{CartLineInput, CartStore, DEFAULT_CART_KEY, FileStorage, MemoryStorage};
use bakery_core::{ComboId, ProductId};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A fresh, empty in-memory cart.
#[must_use]
pub fn memory_cart() -> CartStore<MemoryStorage> {
    CartStore::open(MemoryStorage::new(), DEFAULT_CART_KEY).0
}

/// A fresh temporary directory, removed when dropped.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// File-backed slot storage rooted in `dir`.
#[must_use]
pub fn storage_in(dir: &TempDir) -> FileStorage {
    FileStorage::new(dir.path())
}

/// Add request for a product priced in whole units.
///
/// # Panics
///
/// Panics if `id` is not a valid product ID.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str, price: i64) -> CartLineInput {
    CartLineInput::product(ProductId::parse(id).unwrap(), Decimal::new(price, 0))
}

/// Add request for a combo priced in whole units.
///
/// # Panics
///
/// Panics if `id` is not a valid combo ID.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn combo(id: &str, price: i64) -> CartLineInput {
    CartLineInput::combo(ComboId::parse(id).unwrap(), Decimal::new(price, 0))
}
