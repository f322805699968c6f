//! Newtype IDs for type-safe entity references.
//!
//! Backend identifiers are opaque strings. Use the `define_id!` macro to
//! create wrappers that prevent accidentally mixing IDs from different
//! entity types.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper around a backend string id.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use pomade_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("6651f1c2");
/// let order_id = OrderId::new("6651f1c2");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
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
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a backend identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(OrderId);
define_id!(CommissionId);

/// Product identifier in the backend's string slug form.
///
/// The static catalog ships numeric identifiers while the backend keys carts
/// and products by slug (`7` → `"product-7"`). Every constructor normalizes
/// purely numeric input into the slug form, so a `ProductId` handed to a
/// cart or product call is always backend-valid. Identifiers received from
/// the backend deserialize verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID, normalizing numeric catalog ids to slug form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            Self(format!("product-{id}"))
        } else {
            Self(id)
        }
    }

    /// Create a product ID from a numeric catalog identifier.
    #[must_use]
    pub fn from_catalog(id: u64) -> Self {
        Self(format!("product-{id}"))
    }

    /// Get the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ID and return the inner slug.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self::from_catalog(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        let user_id = UserId::new("abc");
        assert_eq!(user_id.as_str(), "abc");
        assert_eq!(format!("{user_id}"), "abc");
    }

    #[test]
    fn test_product_id_normalizes_numeric_input() {
        assert_eq!(ProductId::new("7").as_str(), "product-7");
        assert_eq!(ProductId::from_catalog(7).as_str(), "product-7");
        assert_eq!(ProductId::from(7u64).as_str(), "product-7");
    }

    #[test]
    fn test_product_id_keeps_slugs_verbatim() {
        assert_eq!(ProductId::new("product-7").as_str(), "product-7");
        assert_eq!(ProductId::new("argan-oil-1l").as_str(), "argan-oil-1l");
    }

    #[test]
    fn test_product_id_deserializes_verbatim() {
        // Backend-owned identifiers are authoritative and are not rewritten.
        let id: ProductId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_product_id_serializes_transparently() {
        let json = serde_json::to_string(&ProductId::from_catalog(9)).unwrap();
        assert_eq!(json, "\"product-9\"");
    }
}
