//! Cart line items and the merge rule that decides when two add requests
//! refer to the same line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakery_core::{ComboId, ProductId};

/// What a cart line refers to: a catalog product (optionally in a given
/// size) or a combo deal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Merchandise {
    /// A single catalog product.
    Product {
        product_id: ProductId,
        /// Size variant; `None` means the product has no size distinction.
        selected_size: Option<String>,
    },
    /// A bundled combo deal.
    Combo { combo_id: ComboId },
}

/// Identity of a line for merging purposes.
///
/// Two products are the same line only when both the product ID and the
/// selected size match (two absent sizes match). Combos match on ID alone.
/// A product never matches a combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKey<'a> {
    Product(&'a ProductId, Option<&'a str>),
    Combo(&'a ComboId),
}

impl Merchandise {
    /// A product without a size variant.
    #[must_use]
    pub const fn product(product_id: ProductId) -> Self {
        Self::Product {
            product_id,
            selected_size: None,
        }
    }

    /// A product in a specific size. Blank sizes are treated as no size.
    #[must_use]
    pub fn sized_product(product_id: ProductId, size: impl Into<String>) -> Self {
        Self::Product {
            product_id,
            selected_size: normalize_size(size.into()),
        }
    }

    /// A combo deal.
    #[must_use]
    pub const fn combo(combo_id: ComboId) -> Self {
        Self::Combo { combo_id }
    }

    /// The merge key for this merchandise.
    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        match self {
            Self::Product {
                product_id,
                selected_size,
            } => LineKey::Product(product_id, selected_size.as_deref()),
            Self::Combo { combo_id } => LineKey::Combo(combo_id),
        }
    }

    /// Whether `self` and `other` should be merged into one cart line.
    #[must_use]
    pub fn same_line(&self, other: &Self) -> bool {
        self.key() == other.key()
    }

    /// The catalog identifier as a string, regardless of kind.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Product { product_id, .. } => product_id.as_str(),
            Self::Combo { combo_id } => combo_id.as_str(),
        }
    }

    /// The selected size, if this is a sized product.
    #[must_use]
    pub fn selected_size(&self) -> Option<&str> {
        match self {
            Self::Product { selected_size, .. } => selected_size.as_deref(),
            Self::Combo { .. } => None,
        }
    }

    /// Lowercase kind label, matching the serialized tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Product { .. } => "product",
            Self::Combo { .. } => "combo",
        }
    }
}

fn normalize_size(size: String) -> Option<String> {
    let trimmed = size.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == size.len() {
        Some(size)
    } else {
        Some(trimmed.to_string())
    }
}

/// One entry in the cart.
///
/// `quantity` is always at least 1 for a line held by the cart; lines whose
/// quantity would drop below 1 are removed instead.
///
/// Persisted as a flat record with a `kind` tag carrying the discriminating
/// fields inline. Prices are written as exact JSON numbers:
///
/// ```json
/// {"kind": "product", "productId": "cake-1", "selectedSize": "8in", "unitPrice": 30, "quantity": 2}
/// {"kind": "combo", "comboId": "brunch-box", "unitPrice": 42.5, "quantity": 1}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineRecord", into = "LineRecord")]
pub struct CartLine {
    pub merchandise: Merchandise,
    /// Price per unit at the time the line was added.
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Display name, passed through untouched.
    pub name: Option<String>,
    /// Image reference, passed through untouched.
    pub image: Option<String>,
}

impl CartLine {
    /// `unit_price * quantity`, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }

    /// The display name, falling back to the catalog ID.
    #[must_use]
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.merchandise.id())
    }
}

/// A request to add merchandise to the cart.
///
/// Built by catalog and combo pages from the backend's product data. The
/// quantity is optional: an absent quantity requests exactly one unit.
///
/// ```rust
/// use bakery_cart::CartLineInput;
/// use bakery_core::ProductId;
/// use rust_decimal::Decimal;
///
/// let input = CartLineInput::product(ProductId::parse("cake-1").unwrap(), Decimal::new(30, 0))
///     .with_size("8in")
///     .with_quantity(2)
///     .with_name("Vanilla cake");
/// assert_eq!(input.requested_quantity(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineInput {
    pub merchandise: Merchandise,
    pub unit_price: Decimal,
    pub quantity: Option<i64>,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl CartLineInput {
    /// Request for arbitrary merchandise.
    #[must_use]
    pub const fn new(merchandise: Merchandise, unit_price: Decimal) -> Self {
        Self {
            merchandise,
            unit_price,
            quantity: None,
            name: None,
            image: None,
        }
    }

    /// Request for a product without a size.
    #[must_use]
    pub const fn product(product_id: ProductId, unit_price: Decimal) -> Self {
        Self::new(Merchandise::product(product_id), unit_price)
    }

    /// Request for a combo deal.
    #[must_use]
    pub const fn combo(combo_id: ComboId, unit_price: Decimal) -> Self {
        Self::new(Merchandise::combo(combo_id), unit_price)
    }

    /// Set the size variant. Has no effect on combos.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        if let Merchandise::Product { selected_size, .. } = &mut self.merchandise {
            *selected_size = normalize_size(size.into());
        }
        self
    }

    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The quantity this request asks for; absent means one unit.
    #[must_use]
    pub fn requested_quantity(&self) -> i64 {
        self.quantity.unwrap_or(1)
    }

    /// Convert into a new cart line, or `None` if the requested quantity is
    /// below 1.
    #[must_use]
    pub fn into_line(self) -> Option<CartLine> {
        let quantity = clamp_quantity(self.requested_quantity())?;
        Some(CartLine {
            merchandise: self.merchandise,
            unit_price: self.unit_price,
            quantity,
            name: self.name,
            image: self.image,
        })
    }
}

/// Convert a signed quantity into a storable one.
///
/// Returns `None` below 1; saturates at `u32::MAX`.
#[must_use]
pub fn clamp_quantity(quantity: i64) -> Option<u32> {
    if quantity < 1 {
        return None;
    }
    Some(u32::try_from(quantity).unwrap_or(u32::MAX))
}

// =============================================================================
// Persisted record
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LineKind {
    Product,
    Combo,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineRecord {
    kind: LineKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product_id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    combo_id: Option<ComboId>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    unit_price: Decimal,
    quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl TryFrom<LineRecord> for CartLine {
    type Error = String;

    fn try_from(record: LineRecord) -> Result<Self, Self::Error> {
        let merchandise = match record.kind {
            LineKind::Product => Merchandise::Product {
                product_id: record
                    .product_id
                    .ok_or("product line is missing productId")?,
                selected_size: record.selected_size.and_then(normalize_size),
            },
            LineKind::Combo => Merchandise::Combo {
                combo_id: record.combo_id.ok_or("combo line is missing comboId")?,
            },
        };
        Ok(Self {
            merchandise,
            unit_price: record.unit_price,
            quantity: record.quantity,
            name: record.name,
            image: record.image,
        })
    }
}

impl From<CartLine> for LineRecord {
    fn from(line: CartLine) -> Self {
        let (kind, product_id, selected_size, combo_id) = match line.merchandise {
            Merchandise::Product {
                product_id,
                selected_size,
            } => (LineKind::Product, Some(product_id), selected_size, None),
            Merchandise::Combo { combo_id } => (LineKind::Combo, None, None, Some(combo_id)),
        };
        Self {
            kind,
            product_id,
            selected_size,
            combo_id,
            unit_price: line.unit_price,
            quantity: line.quantity,
            name: line.name,
            image: line.image,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str) -> ProductId {
        ProductId::parse(id).unwrap()
    }

    fn combo(id: &str) -> ComboId {
        ComboId::parse(id).unwrap()
    }

    #[test]
    fn test_same_product_same_size_is_same_line() {
        let a = Merchandise::sized_product(product("cake-1"), "8in");
        let b = Merchandise::sized_product(product("cake-1"), "8in");
        assert!(a.same_line(&b));
    }

    #[test]
    fn test_same_product_without_size_is_same_line() {
        let a = Merchandise::product(product("cake-1"));
        let b = Merchandise::product(product("cake-1"));
        assert!(a.same_line(&b));
    }

    #[test]
    fn test_different_size_is_distinct_line() {
        let a = Merchandise::sized_product(product("cake-1"), "8in");
        let b = Merchandise::sized_product(product("cake-1"), "10in");
        let c = Merchandise::product(product("cake-1"));
        assert!(!a.same_line(&b));
        assert!(!a.same_line(&c));
    }

    #[test]
    fn test_different_product_is_distinct_line() {
        let a = Merchandise::product(product("cake-1"));
        let b = Merchandise::product(product("cake-2"));
        assert!(!a.same_line(&b));
    }

    #[test]
    fn test_combo_identity() {
        let a = Merchandise::combo(combo("brunch-box"));
        let b = Merchandise::combo(combo("brunch-box"));
        let c = Merchandise::combo(combo("tea-time"));
        assert!(a.same_line(&b));
        assert!(!a.same_line(&c));
    }

    #[test]
    fn test_product_never_matches_combo() {
        let a = Merchandise::product(product("box-1"));
        let b = Merchandise::combo(combo("box-1"));
        assert!(!a.same_line(&b));
    }

    #[test]
    fn test_blank_size_is_no_size() {
        let a = Merchandise::sized_product(product("cake-1"), "  ");
        assert_eq!(a, Merchandise::product(product("cake-1")));

        let b = Merchandise::sized_product(product("cake-1"), " 8in ");
        assert_eq!(b.selected_size(), Some("8in"));
    }

    #[test]
    fn test_with_size_ignored_for_combo() {
        let input = CartLineInput::combo(combo("brunch-box"), Decimal::new(42, 0)).with_size("L");
        assert_eq!(input.merchandise.selected_size(), None);
    }

    #[test]
    fn test_into_line_defaults_quantity_to_one() {
        let line = CartLineInput::product(product("cake-1"), Decimal::new(20, 0))
            .into_line()
            .unwrap();
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_into_line_rejects_non_positive() {
        let zero = CartLineInput::product(product("cake-1"), Decimal::ONE).with_quantity(0);
        let negative = CartLineInput::product(product("cake-1"), Decimal::ONE).with_quantity(-3);
        assert!(zero.into_line().is_none());
        assert!(negative.into_line().is_none());
    }

    #[test]
    fn test_clamp_quantity_saturates() {
        assert_eq!(clamp_quantity(i64::MAX), Some(u32::MAX));
        assert_eq!(clamp_quantity(1), Some(1));
        assert_eq!(clamp_quantity(0), None);
    }

    #[test]
    fn test_line_total() {
        let line = CartLineInput::product(product("cake-1"), Decimal::new(1250, 2))
            .with_quantity(3)
            .into_line()
            .unwrap();
        assert_eq!(line.line_total(), Decimal::new(3750, 2));
    }

    #[test]
    fn test_title_falls_back_to_id() {
        let line = CartLineInput::combo(combo("brunch-box"), Decimal::ONE)
            .into_line()
            .unwrap();
        assert_eq!(line.title(), "brunch-box");

        let named = CartLineInput::combo(combo("brunch-box"), Decimal::ONE)
            .with_name("Brunch Box")
            .into_line()
            .unwrap();
        assert_eq!(named.title(), "Brunch Box");
    }

    #[test]
    fn test_product_line_json_shape() {
        let line = CartLineInput::product(product("cake-1"), Decimal::new(30, 0))
            .with_size("8in")
            .with_quantity(2)
            .with_name("Vanilla cake")
            .into_line()
            .unwrap();

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["kind"], "product");
        assert_eq!(value["productId"], "cake-1");
        assert_eq!(value["selectedSize"], "8in");
        assert_eq!(value["unitPrice"].as_f64(), Some(30.0));
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["name"], "Vanilla cake");
        assert!(value.get("comboId").is_none());
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_combo_line_json_shape() {
        let line = CartLineInput::combo(combo("brunch-box"), Decimal::new(425, 1))
            .into_line()
            .unwrap();

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["kind"], "combo");
        assert_eq!(value["comboId"], "brunch-box");
        assert_eq!(value["unitPrice"].as_f64(), Some(42.5));
        assert!(value.get("productId").is_none());
        assert!(value.get("selectedSize").is_none());
    }

    #[test]
    fn test_line_total_saturates() {
        let line = CartLineInput::product(product("gold-leaf-cake"), Decimal::MAX)
            .with_quantity(2)
            .into_line()
            .unwrap();
        assert_eq!(line.line_total(), Decimal::MAX);
    }

    #[test]
    fn test_price_round_trips_exactly() {
        let price = Decimal::from_str_exact("12345678.123456789").unwrap();
        let line = CartLineInput::product(product("cake-1"), price)
            .into_line()
            .unwrap();

        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"unitPrice\":12345678.123456789"));

        let back: CartLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back.unit_price, price);
        assert_eq!(back, line);
    }

    #[test]
    fn test_record_requires_identifier_for_kind() {
        let missing: Result<CartLine, _> =
            serde_json::from_str(r#"{"kind":"combo","productId":"a","unitPrice":1,"quantity":1}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_record_blank_size_is_no_size() {
        let line: CartLine = serde_json::from_str(
            r#"{"kind":"product","productId":"a","selectedSize":" ","unitPrice":1,"quantity":1}"#,
        )
        .unwrap();
        assert_eq!(line.merchandise, Merchandise::product(product("a")));
    }
}
