use std::sync::Arc;

use tracing::info;

use crate::config::HashConfig;
use crate::error::HashResult;
use crate::local_id::LocalIdHasher;
use crate::numeric::NumericPathHasher;
use crate::path::StoredPathHasher;
use crate::store::{HashStore, InMemoryHashStore};
use crate::store_id::StoreIdHasher;

/// Every hasher the hashed encoding needs, built over one set of stores.
///
/// Populate it once at bootstrap and share it read-only; stringifying and
/// parsing against the same registry is what makes hashed references
/// round-trip.
#[derive(Clone)]
pub struct HashRegistry {
    store_ids: StoreIdHasher,
    local_ids: LocalIdHasher,
    classpaths: StoredPathHasher,
    paths: StoredPathHasher,
    numeric_paths: NumericPathHasher,
}

impl HashRegistry {
    /// Build in-memory stores from `config`.
    pub fn from_config(config: &HashConfig) -> HashResult<Self> {
        let protocols = InMemoryHashStore::with_entries("store protocols", &config.store_protocols)?;
        let identifiers =
            InMemoryHashStore::with_entries("store identifiers", &config.store_identifiers)?;
        let classpaths = InMemoryHashStore::with_entries("classpaths", &config.classpaths)?;
        let paths = InMemoryHashStore::with_entries("paths", &config.paths)?;
        info!(
            protocols = protocols.len(),
            identifiers = identifiers.len(),
            classpaths = classpaths.len(),
            paths = paths.len(),
            radix = config.radix,
            "hash stores bootstrapped"
        );
        Self::with_stores(
            Arc::new(protocols),
            Arc::new(identifiers),
            Arc::new(classpaths),
            Arc::new(paths),
            config.radix,
        )
    }

    /// The default registry: [`HashConfig::default`] contents.
    pub fn standard() -> HashResult<Self> {
        Self::from_config(&HashConfig::default())
    }

    /// Build over externally owned stores.
    pub fn with_stores(
        store_protocols: Arc<dyn HashStore>,
        store_identifiers: Arc<dyn HashStore>,
        classpaths: Arc<dyn HashStore>,
        paths: Arc<dyn HashStore>,
        radix: u32,
    ) -> HashResult<Self> {
        Ok(Self {
            store_ids: StoreIdHasher::new(store_protocols, store_identifiers),
            local_ids: LocalIdHasher::new(radix)?,
            classpaths: StoredPathHasher::new(classpaths),
            paths: StoredPathHasher::new(paths),
            numeric_paths: NumericPathHasher::new(),
        })
    }

    pub fn store_ids(&self) -> &StoreIdHasher {
        &self.store_ids
    }

    pub fn local_ids(&self) -> &LocalIdHasher {
        &self.local_ids
    }

    pub fn classpaths(&self) -> &StoredPathHasher {
        &self.classpaths
    }

    pub fn paths(&self) -> &StoredPathHasher {
        &self.paths
    }

    pub fn numeric_paths(&self) -> &NumericPathHasher {
        &self.numeric_paths
    }
}

impl std::fmt::Debug for HashRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRegistry")
            .field("radix", &self.local_ids.radix())
            .finish_non_exhaustive()
    }
}
