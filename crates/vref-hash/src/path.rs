//! Prefix compression for slash-delimited paths.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{HashError, HashResult};
use crate::store::{validate_code, HashStore};

/// Which encoding tier a hashed path landed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Hashed,
    Literal,
    Mixed,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Hashed => "hashed",
            Tier::Literal => "literal",
            Tier::Mixed => "mixed",
        })
    }
}

/// A path split into a hashed prefix and a literal suffix, at least one of
/// which is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashedPath {
    /// The whole path is represented by a code.
    Hashed(String),
    /// Nothing could be compressed.
    Literal(String),
    /// A code for the prefix followed by the remaining text.
    Mixed { hashed: String, literal: String },
}

impl HashedPath {
    pub fn tier(&self) -> Tier {
        match self {
            HashedPath::Hashed(_) => Tier::Hashed,
            HashedPath::Literal(_) => Tier::Literal,
            HashedPath::Mixed { .. } => Tier::Mixed,
        }
    }

    pub fn hashed_part(&self) -> Option<&str> {
        match self {
            HashedPath::Hashed(hashed) | HashedPath::Mixed { hashed, .. } => Some(hashed),
            HashedPath::Literal(_) => None,
        }
    }

    pub fn literal_part(&self) -> Option<&str> {
        match self {
            HashedPath::Literal(literal) | HashedPath::Mixed { literal, .. } => Some(literal),
            HashedPath::Hashed(_) => None,
        }
    }
}

/// Splits paths into a [`HashedPath`] and joins them back.
pub trait PathHasher: Send + Sync {
    /// Compress `path` as far as this hasher can.
    fn hash(&self, path: &str) -> HashedPath;

    /// Rebuild the path: `lookup(hashed part) ++ literal part`.
    fn lookup(&self, hashed: &HashedPath) -> HashResult<String>;
}

/// Longest-registered-prefix compression over a [`HashStore`].
///
/// Candidates are the whole path and every proper prefix that ends right
/// before a `/`, tried longest first. A proper-prefix match leaves a literal
/// suffix that starts with `/`.
#[derive(Clone)]
pub struct StoredPathHasher {
    store: Arc<dyn HashStore>,
}

impl StoredPathHasher {
    pub fn new(store: Arc<dyn HashStore>) -> Self {
        Self { store }
    }

    /// The store's code for `value`, unless it could not survive the wire.
    fn code_for(&self, value: &str) -> Option<String> {
        let code = self.store.hash(value)?;
        match validate_code(self.store.name(), &code) {
            Ok(()) => Some(code),
            Err(e) => {
                warn!(error = %e, value, "ignoring unusable path code");
                None
            }
        }
    }
}

impl PathHasher for StoredPathHasher {
    fn hash(&self, path: &str) -> HashedPath {
        if path.is_empty() {
            return HashedPath::Literal(String::new());
        }
        if let Some(code) = self.code_for(path) {
            debug!(store = self.store.name(), path, "path fully hashed");
            return HashedPath::Hashed(code);
        }
        for (cut, _) in path.rmatch_indices('/').filter(|(cut, _)| *cut > 0) {
            if let Some(code) = self.code_for(&path[..cut]) {
                debug!(store = self.store.name(), path, cut, "path prefix hashed");
                return HashedPath::Mixed {
                    hashed: code,
                    literal: path[cut..].to_string(),
                };
            }
        }
        debug!(store = self.store.name(), path, "no registered prefix");
        HashedPath::Literal(path.to_string())
    }

    fn lookup(&self, hashed: &HashedPath) -> HashResult<String> {
        let prefix = match hashed.hashed_part() {
            Some(code) => self.store.lookup(code).ok_or_else(|| HashError::UnknownCode {
                store: self.store.name().to_string(),
                code: code.to_string(),
            })?,
            None => String::new(),
        };
        Ok(prefix + hashed.literal_part().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryHashStore;

    fn hasher() -> StoredPathHasher {
        let store = InMemoryHashStore::with_entries(
            "paths",
            [
                ("/app:company_home", "A"),
                ("/app:company_home/app:dictionary", "B"),
            ],
        )
        .unwrap();
        StoredPathHasher::new(Arc::new(store))
    }

    #[test]
    fn fully_hashed() {
        let h = hasher();
        let hashed = h.hash("/app:company_home");
        assert_eq!(hashed, HashedPath::Hashed("A".into()));
        assert_eq!(hashed.tier(), Tier::Hashed);
        assert!(hashed.literal_part().is_none());
        assert_eq!(h.lookup(&hashed).unwrap(), "/app:company_home");
    }

    #[test]
    fn mixed_prefix() {
        let h = hasher();
        let hashed = h.hash("/app:company_home/cm:foo");
        assert_eq!(hashed.tier(), Tier::Mixed);
        assert_eq!(hashed.hashed_part(), Some("A"));
        assert_eq!(hashed.literal_part(), Some("/cm:foo"));
        assert_eq!(h.lookup(&hashed).unwrap(), "/app:company_home/cm:foo");
    }

    #[test]
    fn longest_prefix_wins() {
        let h = hasher();
        let hashed = h.hash("/app:company_home/app:dictionary/cm:templates/cm:x.ftl");
        assert_eq!(hashed.hashed_part(), Some("B"));
        assert_eq!(hashed.literal_part(), Some("/cm:templates/cm:x.ftl"));
    }

    #[test]
    fn prefixes_only_cut_at_separators() {
        let h = hasher();
        let hashed = h.hash("/app:company_homework");
        assert_eq!(hashed, HashedPath::Literal("/app:company_homework".into()));
    }

    #[test]
    fn unregistered_path_is_literal() {
        let h = hasher();
        let hashed = h.hash("/sys:system/sys:people");
        assert_eq!(hashed.tier(), Tier::Literal);
        assert!(hashed.hashed_part().is_none());
        assert_eq!(h.lookup(&hashed).unwrap(), "/sys:system/sys:people");
    }

    #[test]
    fn empty_and_root_paths_are_literal() {
        let h = hasher();
        assert_eq!(h.hash(""), HashedPath::Literal(String::new()));
        assert_eq!(h.hash("/"), HashedPath::Literal("/".into()));
        assert_eq!(h.lookup(&HashedPath::Literal(String::new())).unwrap(), "");
    }

    #[test]
    fn unknown_code_fails_lookup() {
        let err = hasher().lookup(&HashedPath::Hashed("Z".into())).unwrap_err();
        assert!(matches!(err, HashError::UnknownCode { .. }));
    }

    /// Answers with whatever code it was built with, valid or not.
    struct FixedStore(&'static str, &'static str);

    impl HashStore for FixedStore {
        fn name(&self) -> &str {
            "fixed"
        }

        fn hash(&self, value: &str) -> Option<String> {
            (value == self.0).then(|| self.1.to_string())
        }

        fn lookup(&self, code: &str) -> Option<String> {
            (code == self.1).then(|| self.0.to_string())
        }
    }

    #[test]
    fn unusable_codes_fall_back_to_literal() {
        for code in ["p-1", "", "a%b"] {
            let h = StoredPathHasher::new(Arc::new(FixedStore("/a", code)));
            assert_eq!(h.hash("/a"), HashedPath::Literal("/a".into()), "code {code:?}");
            assert_eq!(h.hash("/a/b"), HashedPath::Literal("/a/b".into()), "code {code:?}");
        }

        let h = StoredPathHasher::new(Arc::new(FixedStore("/a", "P1")));
        assert_eq!(h.hash("/a"), HashedPath::Hashed("P1".into()));
    }
}
