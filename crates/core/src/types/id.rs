//! Newtype IDs for type-safe catalog references.
//!
//! Catalog identifiers come from the bakery's REST backend as opaque strings
//! (`"cake-1"`, `"brunch-box"`). Use the `define_id!` macro to create wrappers
//! that prevent accidentally mixing a product ID with a combo ID.

/// Errors that can occur when parsing a catalog ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty or only whitespace.
    #[error("id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Maximum length of a catalog identifier.
pub const MAX_ID_LENGTH: usize = 128;

/// Validate a raw identifier, returning the trimmed value.
///
/// # Errors
///
/// Returns [`IdError`] if the trimmed input is empty or longer than
/// [`MAX_ID_LENGTH`].
pub fn validate_id(raw: &str) -> Result<&str, IdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty);
    }
    if trimmed.len() > MAX_ID_LENGTH {
        return Err(IdError::TooLong {
            max: MAX_ID_LENGTH,
        });
    }
    Ok(trimmed)
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string, validated on the way in
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `parse()`, `as_str()`
/// - `Display`, `FromStr` and `TryFrom<String>` implementations
///
/// # Example
///
/// ```rust
/// # use bakery_core::define_id;
/// define_id!(FlavorId);
/// define_id!(TierId);
///
/// let flavor = FlavorId::parse("vanilla").unwrap();
/// let tier = TierId::parse("vanilla").unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: FlavorId = tier;
/// assert_eq!(flavor.as_str(), tier.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an ID, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns an error if the ID is empty or too long.
            pub fn parse(raw: &str) -> ::core::result::Result<Self, $crate::IdError> {
                $crate::validate_id(raw).map(|id| Self(id.to_owned()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::IdError;

            fn try_from(value: String) -> ::core::result::Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define catalog entity IDs
define_id!(ProductId);
define_id!(ComboId);
