//! Persisted slot format.
//!
//! The cart is stored as a JSON array of line records, in cart order. There
//! is no schema version: anything that does not parse into valid lines is
//! rejected as a whole.

use rust_decimal::Decimal;

use crate::error::CartLoadError;
use crate::line::CartLine;

/// Serialize lines for the persisted slot.
///
/// # Errors
///
/// Returns `serde_json::Error` if a line cannot be serialized.
pub fn encode(lines: &[CartLine]) -> Result<String, serde_json::Error> {
    serde_json::to_string(lines)
}

/// Parse and validate the persisted slot content.
///
/// # Errors
///
/// Returns [`CartLoadError::Malformed`] if the content is not a JSON array of
/// line records, or [`CartLoadError::InvalidLine`] if a line has a zero
/// quantity or a negative unit price.
pub fn decode(raw: &str) -> Result<Vec<CartLine>, CartLoadError> {
    let lines: Vec<CartLine> = serde_json::from_str(raw)?;

    for (index, line) in lines.iter().enumerate() {
        if line.quantity == 0 {
            return Err(CartLoadError::InvalidLine {
                index,
                reason: "quantity must be at least 1".to_string(),
            });
        }
        if line.unit_price < Decimal::ZERO {
            return Err(CartLoadError::InvalidLine {
                index,
                reason: format!("unit price {} is negative", line.unit_price),
            });
        }
    }

    Ok(lines)
}
