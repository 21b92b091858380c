//! The cart state manager.
//!
//! [`CartStore`] owns the ordered list of cart lines for one shopper session.
//! It is created from a persisted slot, mutated through [`CartStore::add`],
//! [`CartStore::remove`], [`CartStore::set_quantity`] and [`CartStore::clear`],
//! and writes the whole cart back to the slot after every mutation.
//!
//! # Example
//!
//! ```rust
//! use bakery_cart::{CartLineInput, CartStore, MemoryStorage};
//! use bakery_core::ProductId;
//! use rust_decimal::Decimal;
//!
//! let (mut cart, _outcome) = CartStore::open(MemoryStorage::new(), "cart");
//!
//! let cake = ProductId::parse("cake-1").unwrap();
//! cart.add(CartLineInput::product(cake, Decimal::new(20, 0))).unwrap();
//!
//! assert_eq!(cart.count(), 1);
//! assert_eq!(cart.total(), Decimal::new(20, 0));
//! ```

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::codec;
use crate::error::{CartLoadError, PersistError};
use crate::line::{CartLine, CartLineInput, Merchandise, clamp_quantity};
use crate::storage::SlotStorage;

/// Default name of the persisted cart slot.
pub const DEFAULT_CART_KEY: &str = "cart";

/// A cart shared between consumers that may run on different threads.
///
/// The mutex is the single-writer policy: each operation observes the state
/// left by the previous one.
pub type SharedCart<S> = Arc<Mutex<CartStore<S>>>;

/// What happened when the persisted cart was read at construction.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The slot held a valid cart with this many lines.
    Restored { lines: usize },
    /// The slot was empty; the cart starts empty.
    Absent,
    /// The slot could not be used; the cart starts empty.
    Reset(CartLoadError),
}

impl LoadOutcome {
    /// Whether the persisted cart was discarded.
    #[must_use]
    pub const fn is_reset(&self) -> bool {
        matches!(self, Self::Reset(_))
    }
}

/// Client-side cart state with write-through persistence.
#[derive(Debug)]
pub struct CartStore<S> {
    lines: Vec<CartLine>,
    storage: S,
    key: String,
    dirty: bool,
}

impl<S: SlotStorage> CartStore<S> {
    /// Restore the cart from `key` in `storage`.
    ///
    /// Never fails: an absent, unreadable or malformed slot yields an empty
    /// cart, and the returned [`LoadOutcome`] says which case applied.
    pub fn open(storage: S, key: impl Into<String>) -> (Self, LoadOutcome) {
        let key = key.into();

        let (lines, outcome) = match load(&storage, &key) {
            Ok(Some(lines)) => {
                let count = lines.len();
                debug!(key = %key, lines = count, "Cart restored");
                (lines, LoadOutcome::Restored { lines: count })
            }
            Ok(None) => {
                debug!(key = %key, "No persisted cart");
                (Vec::new(), LoadOutcome::Absent)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable cart");
                (Vec::new(), LoadOutcome::Reset(e))
            }
        };

        let store = Self {
            lines,
            storage,
            key,
            dirty: false,
        };
        (store, outcome)
    }

    /// Add merchandise to the cart.
    ///
    /// If a line with the same merge key exists, its quantity grows by the
    /// requested quantity (one if unspecified) and it keeps its position.
    /// Otherwise the request is appended as a new line.
    ///
    /// Quantities are not validated. A merge that would leave the line below
    /// one unit removes it; a new line below one unit is not stored. A
    /// request with a negative unit price is ignored, since such a line could
    /// not be restored from the slot.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the cart could not be written. The
    /// in-memory change is kept.
    pub fn add(&mut self, candidate: CartLineInput) -> Result<(), PersistError> {
        if candidate.unit_price < Decimal::ZERO {
            warn!(
                id = %candidate.merchandise.id(),
                unit_price = %candidate.unit_price,
                "Ignoring add with negative unit price"
            );
            return self.persist();
        }

        let delta = candidate.requested_quantity();

        match self.position_of(&candidate.merchandise) {
            Some(index) => {
                let merged = self
                    .lines
                    .get(index)
                    .map(|line| i64::from(line.quantity).saturating_add(delta))
                    .and_then(clamp_quantity);
                match merged {
                    Some(quantity) => {
                        if let Some(line) = self.lines.get_mut(index) {
                            line.quantity = quantity;
                        }
                        debug!(index, quantity, "Merged into existing cart line");
                    }
                    None => {
                        self.lines.remove(index);
                        debug!(index, "Merged quantity below one, line removed");
                    }
                }
            }
            None => match candidate.into_line() {
                Some(line) => {
                    debug!(id = %line.merchandise.id(), quantity = line.quantity, "Appended cart line");
                    self.lines.push(line);
                }
                None => {
                    debug!(delta, "Ignoring new line with quantity below one");
                }
            },
        }

        self.persist()
    }

    /// Remove the line at `index`. Out-of-range indices change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the cart could not be written.
    pub fn remove(&mut self, index: usize) -> Result<(), PersistError> {
        if index < self.lines.len() {
            self.lines.remove(index);
            debug!(index, "Removed cart line");
        } else {
            debug!(index, len = self.lines.len(), "Remove index out of range");
        }
        self.persist()
    }

    /// Overwrite the quantity of the line at `index`, keeping its position.
    ///
    /// A quantity below one removes the line, exactly like [`Self::remove`].
    /// Out-of-range indices change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the cart could not be written.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<(), PersistError> {
        let Some(quantity) = clamp_quantity(quantity) else {
            return self.remove(index);
        };

        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = quantity;
            debug!(index, quantity, "Updated cart line quantity");
        } else {
            debug!(index, len = self.lines.len(), "Quantity index out of range");
        }
        self.persist()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the cart could not be written.
    pub fn clear(&mut self) -> Result<(), PersistError> {
        let removed = self.lines.len();
        self.lines.clear();
        info!(removed, "Cart cleared");
        self.persist()
    }

    /// Retry writing the current cart, e.g. after a failed mutation.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the cart still could not be written.
    pub fn flush(&mut self) -> Result<(), PersistError> {
        self.persist()
    }

    /// Whether the last write failed, leaving the slot behind memory.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sum of `unit_price * quantity` over all lines. Zero when empty.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .unwrap_or(Decimal::MAX)
    }

    /// Sum of quantities over all lines. Zero when empty.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Read-only view of the lines, in cart order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines, in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// Number of distinct lines (not units; see [`Self::count`]).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The slot this cart persists to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The cart serialized in its persisted format.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if a line cannot be serialized.
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        codec::encode(&self.lines)
    }

    /// Borrow the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give up the cart and return its storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Wrap the cart for sharing across consumers.
    #[must_use]
    pub fn into_shared(self) -> SharedCart<S> {
        Arc::new(Mutex::new(self))
    }

    fn position_of(&self, merchandise: &Merchandise) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.merchandise.same_line(merchandise))
    }

    fn persist(&mut self) -> Result<(), PersistError> {
        let result = codec::encode(&self.lines)
            .map_err(PersistError::from)
            .and_then(|json| {
                self.storage
                    .write(&self.key, &json)
                    .map_err(PersistError::from)
            });

        match &result {
            Ok(()) => {
                self.dirty = false;
                debug!(key = %self.key, lines = self.lines.len(), "Cart persisted");
            }
            Err(e) => {
                self.dirty = true;
                warn!(key = %self.key, error = %e, "Failed to persist cart, keeping in-memory state");
            }
        }
        result
    }
}

impl<'a, S: SlotStorage> IntoIterator for &'a CartStore<S> {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn load<S: SlotStorage>(storage: &S, key: &str) -> Result<Option<Vec<CartLine>>, CartLoadError> {
    match storage.read(key)? {
        Some(raw) => codec::decode(&raw).map(Some),
        None => Ok(None),
    }
}
