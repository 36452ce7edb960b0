//! The [`ContentService`] trait: what resolution needs from the repository.
//!
//! Resolution never stores anything itself. Types, aspects and path bindings
//! of real content come from whatever backend implements this trait.

use std::collections::BTreeSet;
use std::sync::Arc;

use vref_types::ContentLocator;

use crate::error::ServiceResult;

/// Read access to repository content.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait ContentService: Send + Sync {
    /// Returns `true` if content exists at `locator`.
    fn exists(&self, locator: &ContentLocator) -> ServiceResult<bool>;

    /// The content type of the node at `locator`, e.g. `cm:content`.
    fn type_of(&self, locator: &ContentLocator) -> ServiceResult<String>;

    /// The aspects applied to the node at `locator`.
    fn aspects_of(&self, locator: &ContentLocator) -> ServiceResult<BTreeSet<String>>;

    /// The locator bound to a repository path, if any.
    fn resolve_path(&self, path: &str) -> ServiceResult<Option<ContentLocator>>;

    /// Returns `true` if the node at `locator` carries `aspect`.
    fn has_aspect(&self, locator: &ContentLocator, aspect: &str) -> ServiceResult<bool> {
        Ok(self.aspects_of(locator)?.contains(aspect))
    }
}

impl<T: ContentService + ?Sized> ContentService for Arc<T> {
    fn exists(&self, locator: &ContentLocator) -> ServiceResult<bool> {
        (**self).exists(locator)
    }

    fn type_of(&self, locator: &ContentLocator) -> ServiceResult<String> {
        (**self).type_of(locator)
    }

    fn aspects_of(&self, locator: &ContentLocator) -> ServiceResult<BTreeSet<String>> {
        (**self).aspects_of(locator)
    }

    fn resolve_path(&self, path: &str) -> ServiceResult<Option<ContentLocator>> {
        (**self).resolve_path(path)
    }

    fn has_aspect(&self, locator: &ContentLocator, aspect: &str) -> ServiceResult<bool> {
        (**self).has_aspect(locator, aspect)
    }
}
