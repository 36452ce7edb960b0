//! In-memory content service for testing and embedding.
//!
//! [`InMemoryContentService`] keeps nodes and path bindings in `HashMap`s
//! protected by `RwLock`s.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use vref_types::ContentLocator;

use crate::error::{ServiceError, ServiceResult};
use crate::service::ContentService;

#[derive(Clone, Debug)]
struct NodeRecord {
    type_name: String,
    aspects: BTreeSet<String>,
}

/// An in-memory implementation of [`ContentService`].
///
/// Data is lost when the service is dropped.
#[derive(Debug, Default)]
pub struct InMemoryContentService {
    nodes: RwLock<HashMap<ContentLocator, NodeRecord>>,
    paths: RwLock<HashMap<String, ContentLocator>>,
}

impl InMemoryContentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the node at `locator`.
    pub fn put_node<I, A>(&self, locator: ContentLocator, type_name: &str, aspects: I) -> ServiceResult<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let record = NodeRecord {
            type_name: type_name.to_string(),
            aspects: aspects.into_iter().map(Into::into).collect(),
        };
        let mut nodes = self.nodes.write().map_err(poisoned)?;
        nodes.insert(locator, record);
        Ok(())
    }

    /// Apply an aspect to an existing node.
    pub fn add_aspect(&self, locator: &ContentLocator, aspect: &str) -> ServiceResult<()> {
        let mut nodes = self.nodes.write().map_err(poisoned)?;
        let record = nodes.get_mut(locator).ok_or_else(|| not_found(locator))?;
        record.aspects.insert(aspect.to_string());
        Ok(())
    }

    /// Remove a node. Returns `true` if it existed.
    pub fn remove_node(&self, locator: &ContentLocator) -> ServiceResult<bool> {
        let mut nodes = self.nodes.write().map_err(poisoned)?;
        Ok(nodes.remove(locator).is_some())
    }

    /// Bind a repository path to a locator.
    pub fn bind_path(&self, path: &str, locator: ContentLocator) -> ServiceResult<()> {
        let mut paths = self.paths.write().map_err(poisoned)?;
        paths.insert(path.to_string(), locator);
        Ok(())
    }

    fn with_node<T>(
        &self,
        locator: &ContentLocator,
        f: impl FnOnce(&NodeRecord) -> T,
    ) -> ServiceResult<T> {
        let nodes = self.nodes.read().map_err(poisoned)?;
        nodes.get(locator).map(f).ok_or_else(|| not_found(locator))
    }
}

impl ContentService for InMemoryContentService {
    fn exists(&self, locator: &ContentLocator) -> ServiceResult<bool> {
        let nodes = self.nodes.read().map_err(poisoned)?;
        Ok(nodes.contains_key(locator))
    }

    fn type_of(&self, locator: &ContentLocator) -> ServiceResult<String> {
        self.with_node(locator, |record| record.type_name.clone())
    }

    fn aspects_of(&self, locator: &ContentLocator) -> ServiceResult<BTreeSet<String>> {
        self.with_node(locator, |record| record.aspects.clone())
    }

    fn resolve_path(&self, path: &str) -> ServiceResult<Option<ContentLocator>> {
        let paths = self.paths.read().map_err(poisoned)?;
        Ok(paths.get(path).cloned())
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> ServiceError {
    ServiceError::Backend(format!("lock poisoned: {e}"))
}

fn not_found(locator: &ContentLocator) -> ServiceError {
    ServiceError::NotFound {
        locator: locator.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vref_types::StoreId;

    fn doc(id: &str) -> ContentLocator {
        ContentLocator::new(StoreId::workspace(), id)
    }

    #[test]
    fn put_and_read_node() {
        let service = InMemoryContentService::new();
        service
            .put_node(doc("a"), "cm:content", ["cm:titled", "cm:auditable"])
            .unwrap();

        assert!(service.exists(&doc("a")).unwrap());
        assert_eq!(service.type_of(&doc("a")).unwrap(), "cm:content");
        let aspects = service.aspects_of(&doc("a")).unwrap();
        assert_eq!(aspects.len(), 2);
        assert!(service.has_aspect(&doc("a"), "cm:titled").unwrap());
        assert!(!service.has_aspect(&doc("a"), "cm:versionable").unwrap());
    }

    #[test]
    fn missing_node_is_not_found() {
        let service = InMemoryContentService::new();
        assert!(!service.exists(&doc("ghost")).unwrap());
        assert_eq!(
            service.type_of(&doc("ghost")).unwrap_err(),
            ServiceError::NotFound {
                locator: "workspace://SpacesStore/ghost".into()
            }
        );
        assert!(service.add_aspect(&doc("ghost"), "cm:titled").is_err());
    }

    #[test]
    fn add_aspect_and_remove() {
        let service = InMemoryContentService::new();
        service.put_node(doc("a"), "cm:folder", Vec::<String>::new()).unwrap();
        service.add_aspect(&doc("a"), "cm:titled").unwrap();
        assert!(service.has_aspect(&doc("a"), "cm:titled").unwrap());

        assert!(service.remove_node(&doc("a")).unwrap());
        assert!(!service.remove_node(&doc("a")).unwrap());
    }

    #[test]
    fn path_bindings() {
        let service = InMemoryContentService::new();
        service.bind_path("/app:company_home", doc("home")).unwrap();
        assert_eq!(
            service.resolve_path("/app:company_home").unwrap(),
            Some(doc("home"))
        );
        assert_eq!(service.resolve_path("/elsewhere").unwrap(), None);
    }

    #[test]
    fn concurrent_readers() {
        let service = std::sync::Arc::new(InMemoryContentService::new());
        service.put_node(doc("a"), "cm:content", ["cm:titled"]).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                std::thread::spawn(move || service.type_of(&doc("a")).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "cm:content");
        }
    }
}
