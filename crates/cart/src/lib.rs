//! Bakery Cart - client-side shopping cart state.
//!
//! This crate owns the shopper's cart: the list of products and combo deals
//! they intend to buy, the rule for merging repeated additions, the totals
//! shown on the cart page and navbar badge, and write-through persistence to
//! a single key-value slot.
//!
//! # Architecture
//!
//! - [`CartStore`] is owned by the application's composition root and lent
//!   to pages by reference, or shared through [`SharedCart`].
//! - Persistence goes through the [`SlotStorage`] trait: [`MemoryStorage`]
//!   for tests and embedding, [`FileStorage`] for a directory of JSON slots.
//! - Loading never fails; a corrupt slot is reported as
//!   [`LoadOutcome::Reset`] and the cart starts empty.
//!
//! # Modules
//!
//! - [`line`] - Line items, add requests and the merge key
//! - [`store`] - The cart state manager
//! - [`codec`] - Persisted slot format
//! - [`storage`] - Slot storage backends
//! - [`config`] - Environment configuration
//! - [`view`] - Display summaries
//! - [`error`] - Error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod codec;
pub mod config;
pub mod error;
pub mod line;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{CartConfig, ConfigError};
pub use error::{CartLoadError, PersistError, StorageError};
pub use line::{CartLine, CartLineInput, LineKey, Merchandise};
pub use storage::{FileStorage, MemoryStorage, SlotStorage};
pub use store::{CartStore, DEFAULT_CART_KEY, LoadOutcome, SharedCart};
pub use view::{CartLineView, CartView};
