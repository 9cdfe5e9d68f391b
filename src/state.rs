//! Application global-state decoding.
//!
//! The read APIs return application state as a list of key/value entries
//! where keys and byte values are base64-encoded and each value carries a
//! type tag (bytes or uint). [`GlobalState::decode`] turns that list into
//! a typed map. A malformed entry never aborts the decode: the entry is
//! skipped and the rest of the list is processed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Type tag for a byte-string value.
const TEAL_TYPE_BYTES: u64 = 1;
/// Type tag for an unsigned-integer value.
const TEAL_TYPE_UINT: u64 = 2;

/// A raw key/value entry as returned by algod and the indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TealKeyValue {
    /// Base64-encoded key.
    pub key: String,
    /// The tagged value.
    pub value: TealValue,
}

/// A raw tagged value: type 1 is bytes, type 2 is uint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TealValue {
    /// The value type tag.
    #[serde(rename = "type")]
    pub value_type: u64,
    /// Base64-encoded bytes payload, present for type 1.
    #[serde(default)]
    pub bytes: String,
    /// Unsigned-integer payload, present for type 2.
    #[serde(default)]
    pub uint: u64,
}

/// A decoded state value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValue {
    /// An unsigned integer.
    Uint(u64),
    /// A byte string, UTF-8 where the contract stores text.
    Bytes(Vec<u8>),
}

impl StateValue {
    /// Returns the integer value, if this is a uint.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            StateValue::Uint(v) => Some(*v),
            StateValue::Bytes(_) => None,
        }
    }

    /// Returns the value as text, if this is a valid UTF-8 byte string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StateValue::Uint(_) => None,
            StateValue::Bytes(b) => std::str::from_utf8(b).ok(),
        }
    }
}

/// Decoded application global state.
///
/// Rebuilt fresh on every read; the SDK never caches it. Lookups for keys
/// the contract has not set yet fall back to documented defaults (zero for
/// integers, `false` for flags, `None` for text), so callers tolerate
/// partially-initialized state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalState {
    entries: HashMap<String, StateValue>,
}

impl GlobalState {
    /// Decodes a raw key/value list into typed state.
    ///
    /// Entries with an undecodable key, a non-UTF-8 key, an invalid bytes
    /// payload, or an unknown type tag are skipped with a warning; the
    /// remaining entries are still decoded.
    pub fn decode(raw: &[TealKeyValue]) -> Self {
        let mut entries = HashMap::with_capacity(raw.len());

        for kv in raw {
            let key = match base64::decode(&kv.key).map(String::from_utf8) {
                Ok(Ok(key)) => key,
                _ => {
                    warn!(key = %kv.key, "skipping state entry with undecodable key");
                    continue;
                }
            };

            let value = match kv.value.value_type {
                TEAL_TYPE_UINT => StateValue::Uint(kv.value.uint),
                TEAL_TYPE_BYTES => match base64::decode(&kv.value.bytes) {
                    Ok(bytes) => StateValue::Bytes(bytes),
                    Err(_) => {
                        warn!(%key, "skipping state entry with undecodable bytes value");
                        continue;
                    }
                },
                other => {
                    warn!(%key, value_type = other, "skipping state entry with unknown type tag");
                    continue;
                }
            };

            entries.insert(key, value);
        }

        Self { entries }
    }

    /// Returns the raw value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.entries.get(key)
    }

    /// Returns the integer value for a key, or 0 when the key is absent
    /// or holds bytes.
    pub fn uint(&self, key: &str) -> u64 {
        self.get(key).and_then(StateValue::as_uint).unwrap_or(0)
    }

    /// Returns true when the key holds the integer 1.
    pub fn flag(&self, key: &str) -> bool {
        self.uint(key) == 1
    }

    /// Returns the text value for a key, or `None` when the key is absent,
    /// holds an integer, or holds bytes that are not valid UTF-8.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StateValue::as_text)
    }

    /// Returns the text value for a key, or the given sentinel when no
    /// usable text is stored.
    pub fn text_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.text(key).unwrap_or(default)
    }

    /// Returns the number of decoded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries were decoded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
