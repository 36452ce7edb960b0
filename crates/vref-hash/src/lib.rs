//! Dictionary compression for virtual references.
//!
//! Long, frequently repeated strings (store names, repository path prefixes,
//! template classpaths) are registered once in a [`HashStore`] and replaced
//! on the wire by short codes. Local ids and numeric template paths are not
//! registered anywhere; they are re-encoded arithmetically instead.
//!
//! # Hashers
//!
//! - [`StoreIdHasher`] — two fixed characters, no literal fallback
//! - [`LocalIdHasher`] — radix re-encoding, UUID-aware
//! - [`StoredPathHasher`] — longest-registered-prefix compression
//! - [`NumericPathHasher`] — numeric template paths, root kept literal
//!
//! A [`HashRegistry`] bundles them over one set of stores, bootstrapped from
//! a [`HashConfig`].

pub mod config;
pub mod error;
pub mod local_id;
pub mod numeric;
pub mod path;
pub mod registry;
pub mod store;
pub mod store_id;

pub use config::HashConfig;
pub use error::{HashError, HashResult};
pub use local_id::{canonical_uuid, LocalIdHasher, DEFAULT_RADIX, NON_UUID_MARKER};
pub use numeric::NumericPathHasher;
pub use path::{HashedPath, PathHasher, StoredPathHasher, Tier};
pub use registry::HashRegistry;
pub use store::{HashStore, InMemoryHashStore};
pub use store_id::{StoreIdHasher, STORE_HASH_WIDTH};
