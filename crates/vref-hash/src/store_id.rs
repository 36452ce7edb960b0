use std::sync::Arc;

use tracing::warn;
use vref_types::StoreId;

use crate::error::{HashError, HashResult};
use crate::store::{validate_code, HashStore};

/// Width of a hashed store identifier: one character per component.
pub const STORE_HASH_WIDTH: usize = 2;

/// Hashes a [`StoreId`] into exactly two characters.
///
/// The protocol name and the instance identifier are each looked up in their
/// own [`HashStore`]. There is no literal fallback: the wire slot is fixed
/// width, so an unregistered component fails the whole operation.
#[derive(Clone)]
pub struct StoreIdHasher {
    protocols: Arc<dyn HashStore>,
    identifiers: Arc<dyn HashStore>,
}

impl StoreIdHasher {
    pub fn new(protocols: Arc<dyn HashStore>, identifiers: Arc<dyn HashStore>) -> Self {
        Self {
            protocols,
            identifiers,
        }
    }

    /// Hash `store` as `code(protocol) ++ code(identifier)`.
    pub fn hash(&self, store: &StoreId) -> HashResult<String> {
        let protocol = component_code(self.protocols.as_ref(), "protocol", store.protocol())?;
        let identifier =
            component_code(self.identifiers.as_ref(), "identifier", store.identifier())?;
        Ok(format!("{protocol}{identifier}"))
    }

    /// Reverse [`hash`](Self::hash).
    pub fn lookup(&self, hashed: &str) -> HashResult<StoreId> {
        let mut chars = hashed.chars();
        let (Some(protocol), Some(identifier), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(HashError::MalformedHash {
                value: hashed.to_string(),
                reason: format!("store hash must be {STORE_HASH_WIDTH} characters"),
            });
        };
        let protocol = component_value(self.protocols.as_ref(), protocol)?;
        let identifier = component_value(self.identifiers.as_ref(), identifier)?;
        Ok(StoreId::new(protocol, identifier))
    }
}

fn component_code(store: &dyn HashStore, component: &'static str, value: &str) -> HashResult<String> {
    let Some(code) = store.hash(value) else {
        warn!(component, value, "store identifier component has no registered code");
        return Err(HashError::UnregisteredStore {
            component,
            value: value.to_string(),
        });
    };
    validate_code(store.name(), &code)?;
    if code.chars().count() != 1 {
        return Err(HashError::InvalidCode {
            store: store.name().to_string(),
            code,
            reason: "store component codes must be a single character".into(),
        });
    }
    Ok(code)
}

fn component_value(store: &dyn HashStore, code: char) -> HashResult<String> {
    let code = code.to_string();
    store.lookup(&code).ok_or_else(|| HashError::UnknownCode {
        store: store.name().to_string(),
        code,
    })
}
