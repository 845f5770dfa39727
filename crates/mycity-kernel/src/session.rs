//! Session attribute accessor.
//!
//! Session attributes are the small key/value map the voice platform
//! round-trips with every request.  The router itself only cares about two
//! keys, [`CURRENT_ADDRESS_KEY`] and [`ADDRESS_PROMPTED_FROM_INTENT_KEY`]; both
//! are part of the contract with the intent handlers and must stay stable.
//!
//! # Example
//!
//! ```rust
//! # use mycity_kernel::session::SessionAttributes;
//! let mut attrs = SessionAttributes::new();
//! attrs.set_address("46 Everdean St");
//! assert_eq!(attrs.address(), Some("46 Everdean St"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Session key holding the user's current address.
pub const CURRENT_ADDRESS_KEY: &str = "currentAddress";

/// Session key holding the intent that prompted the user for an address.
pub const ADDRESS_PROMPTED_FROM_INTENT_KEY: &str = "addressPromptedFromIntent";

/// Slot name carrying the spoken address in `SetAddressIntent`.
pub const ADDRESS_SLOT: &str = "Address";

/// Session-scoped attributes for a single request/response cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionAttributes {
    inner: Map<String, Value>,
}

impl SessionAttributes {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Return the value under `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.inner.get(key).and_then(Value::as_str)
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.insert(key.into(), value.into())
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.inner.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over all attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    // -- Address ------------------------------------------------------------

    /// The stored address, if any.
    pub fn address(&self) -> Option<&str> {
        self.get_str(CURRENT_ADDRESS_KEY)
    }

    /// Whether a usable address has been stored for this session.
    ///
    /// A `null` or non-string value under the key does not count.
    pub fn has_address(&self) -> bool {
        self.address().is_some()
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.insert(CURRENT_ADDRESS_KEY, address.into());
    }

    // -- Prompted-from marker -------------------------------------------------

    /// The intent that prompted for an address, without consuming it.
    pub fn prompted_from_intent(&self) -> Option<&str> {
        self.get_str(ADDRESS_PROMPTED_FROM_INTENT_KEY)
    }

    /// Record the intent that is waiting on an address.
    pub fn set_prompted_from_intent(&mut self, intent: impl Into<String>) {
        self.insert(ADDRESS_PROMPTED_FROM_INTENT_KEY, intent.into());
    }

    /// Remove and return the prompted-from intent.
    ///
    /// The key is deleted even if the stored value is not a string.
    pub fn take_prompted_from_intent(&mut self) -> Option<String> {
        match self.remove(ADDRESS_PROMPTED_FROM_INTENT_KEY)? {
            Value::String(intent) => Some(intent),
            other => {
                tracing::warn!(value = %other, "discarding non-string prompted-from marker");
                None
            }
        }
    }
}

impl From<Map<String, Value>> for SessionAttributes {
    fn from(inner: Map<String, Value>) -> Self {
        Self { inner }
    }
}

impl From<SessionAttributes> for Map<String, Value> {
    fn from(attrs: SessionAttributes) -> Self {
        attrs.inner
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
