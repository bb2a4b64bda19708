//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a ProductId where an AddressId is expected. All IDs are
//! assigned by the backend; the client only carries them around.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the backend handed us an empty identifier.
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Move a record's `_id` key into `id` unless `id` already holds a value.
pub(crate) fn fold_legacy_id(mut value: serde_json::Value) -> serde_json::Value {
    if let serde_json::Value::Object(map) = &mut value {
        if let Some(legacy) = map.remove("_id") {
            let has_id = map
                .get("id")
                .is_some_and(|id| !id.is_null() && id.as_str() != Some(""));
            if !has_id {
                map.insert("id".to_string(), legacy);
            }
        }
    }
    value
}

define_id!(
    /// Catalog product identifier.
    ProductId
);
define_id!(
    /// Canonical user identifier.
    UserId
);
define_id!(
    /// Saved address identifier.
    AddressId
);
define_id!(
    /// Database identifier of an order, used in resource paths.
    OrderId
);
define_id!(
    /// Human-readable order number shown to customers.
    OrderNumber
);
define_id!(
    /// Return request identifier.
    ReturnId
);
define_id!(
    /// Payment transaction identifier.
    TransactionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "prod-456".into();
        assert_eq!(id.as_str(), "prod-456");
    }

    #[test]
    fn test_id_display() {
        let id = OrderNumber::new("ORD-789");
        assert_eq!(format!("{}", id), "ORD-789");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = AddressId::new("addr-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"addr-1\"");
        let back: AddressId = serde_json::from_str("\"addr-1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_blank_id_is_empty() {
        assert!(UserId::new("  ").is_empty());
        assert!(!UserId::new("u1").is_empty());
    }

    #[test]
    fn test_fold_legacy_id() {
        use serde_json::json;

        let folded = fold_legacy_id(json!({"_id": "a"}));
        assert_eq!(folded, json!({"id": "a"}));

        let folded = fold_legacy_id(json!({"_id": "a", "id": "b"}));
        assert_eq!(folded, json!({"id": "b"}));

        let folded = fold_legacy_id(json!({"_id": "a", "id": ""}));
        assert_eq!(folded, json!({"id": "a"}));
    }
}
