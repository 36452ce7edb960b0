use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Separator between a store protocol and its identifier.
const SCHEME_SEPARATOR: &str = "://";

/// Names one content store: a protocol (e.g. `workspace`) plus an instance
/// identifier (e.g. `SpacesStore`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoreId {
    protocol: String,
    identifier: String,
}

impl StoreId {
    /// The main working store, `workspace://SpacesStore`.
    pub fn workspace() -> Self {
        Self::new("workspace", "SpacesStore")
    }

    pub fn new(protocol: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            identifier: identifier.into(),
        }
    }

    /// The protocol name, e.g. `workspace` or `archive`.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// The store instance identifier, e.g. `SpacesStore`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Debug for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreId({self})")
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SCHEME_SEPARATOR}{}", self.protocol, self.identifier)
    }
}

impl FromStr for StoreId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protocol, identifier) = s
            .split_once(SCHEME_SEPARATOR)
            .ok_or_else(|| TypeError::InvalidLocator(format!("missing '://' in {s:?}")))?;
        if protocol.is_empty() || identifier.is_empty() || identifier.contains('/') {
            return Err(TypeError::InvalidLocator(format!("malformed store {s:?}")));
        }
        Ok(Self::new(protocol, identifier))
    }
}

/// Points at one stored item: a store plus the item's local id.
///
/// Most local ids are lowercase hyphenated UUIDs, but any string is allowed;
/// the hashed wire encoding handles both.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentLocator {
    store: StoreId,
    id: String,
}

impl ContentLocator {
    pub fn new(store: StoreId, id: impl Into<String>) -> Self {
        Self {
            store,
            id: id.into(),
        }
    }

    pub fn store(&self) -> &StoreId {
        &self.store
    }

    /// The store-local id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Debug for ContentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentLocator({self})")
    }
}

impl fmt::Display for ContentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.store, self.id)
    }
}

impl FromStr for ContentLocator {
    type Err = TypeError;

    /// Parse `protocol://identifier/id`. The id may itself contain `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protocol, rest) = s
            .split_once(SCHEME_SEPARATOR)
            .ok_or_else(|| TypeError::InvalidLocator(format!("missing '://' in {s:?}")))?;
        let (identifier, id) = rest
            .split_once('/')
            .ok_or_else(|| TypeError::InvalidLocator(format!("missing local id in {s:?}")))?;
        if protocol.is_empty() || identifier.is_empty() {
            return Err(TypeError::InvalidLocator(format!("malformed store in {s:?}")));
        }
        Ok(Self::new(StoreId::new(protocol, identifier), id))
    }
}
