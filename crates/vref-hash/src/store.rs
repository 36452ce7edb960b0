//! Bidirectional value ↔ code dictionaries.
//!
//! A [`HashStore`] maps registered values to short codes and back. Absence in
//! either direction is a normal outcome: callers fall back to literal
//! encoding, or fail if no literal form exists.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use crate::error::{HashError, HashResult};

/// A registered bijection between values and short codes.
///
/// Implementations must be thread-safe and must never invent codes: `hash`
/// returns `None` for unregistered values, `lookup` returns `None` for
/// unbound codes, and `lookup(hash(v)) == Some(v)` whenever `hash(v)` is
/// present.
pub trait HashStore: Send + Sync {
    /// Name used in diagnostics, e.g. `"paths"`.
    fn name(&self) -> &str;

    /// The code registered for `value`, if any.
    fn hash(&self, value: &str) -> Option<String>;

    /// The value bound to `code`, if any.
    fn lookup(&self, code: &str) -> Option<String>;
}

#[derive(Default)]
struct Entries {
    by_value: HashMap<String, String>,
    by_code: HashMap<String, String>,
}

/// An in-memory [`HashStore`] populated at bootstrap.
///
/// Both directions live in `HashMap`s behind a single `RwLock`, so readers
/// never observe a half-registered pair.
pub struct InMemoryHashStore {
    name: String,
    entries: RwLock<Entries>,
}

impl InMemoryHashStore {
    /// Create an empty store.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Create a store from `(value, code)` pairs.
    pub fn with_entries<I, V, C>(name: impl Into<String>, entries: I) -> HashResult<Self>
    where
        I: IntoIterator<Item = (V, C)>,
        V: Into<String>,
        C: Into<String>,
    {
        let store = Self::new(name);
        for (value, code) in entries {
            store.put(value, code)?;
        }
        Ok(store)
    }

    /// Register `value` under `code`.
    ///
    /// Re-registering an identical pair is a no-op. Binding a value or a code
    /// that is already taken by a different partner is rejected, keeping the
    /// store a bijection.
    pub fn put(&self, value: impl Into<String>, code: impl Into<String>) -> HashResult<()> {
        let value = value.into();
        let code = code.into();
        validate_code(&self.name, &code)?;

        let mut entries = self.entries.write().expect("hash store lock poisoned");
        if let Some(existing) = entries.by_value.get(&value) {
            if *existing == code {
                return Ok(());
            }
            return Err(HashError::DuplicateValue {
                store: self.name.clone(),
                value,
                existing: existing.clone(),
            });
        }
        if let Some(existing) = entries.by_code.get(&code) {
            return Err(HashError::DuplicateCode {
                store: self.name.clone(),
                code,
                existing: existing.clone(),
            });
        }
        entries.by_code.insert(code.clone(), value.clone());
        entries.by_value.insert(value, code);
        Ok(())
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.entries.read().expect("hash store lock poisoned").by_value.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HashStore for InMemoryHashStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn hash(&self, value: &str) -> Option<String> {
        let entries = self.entries.read().expect("hash store lock poisoned");
        entries.by_value.get(value).cloned()
    }

    fn lookup(&self, code: &str) -> Option<String> {
        let entries = self.entries.read().expect("hash store lock poisoned");
        entries.by_code.get(code).cloned()
    }
}

impl fmt::Debug for InMemoryHashStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryHashStore")
            .field("name", &self.name)
            .field("entries", &self.len())
            .finish()
    }
}

/// Codes must be non-empty ASCII alphanumerics so they can never clash with
/// the wire delimiter or literal escapes.
pub(crate) fn validate_code(store: &str, code: &str) -> HashResult<()> {
    if code.is_empty() {
        return Err(HashError::InvalidCode {
            store: store.to_string(),
            code: code.to_string(),
            reason: "code must not be empty".into(),
        });
    }
    if let Some(ch) = code.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(HashError::InvalidCode {
            store: store.to_string(),
            code: code.to_string(),
            reason: format!("contains non-alphanumeric character: {ch:?}"),
        });
    }
    Ok(())
}
