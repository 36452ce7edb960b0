use std::collections::BTreeSet;

use vref_types::{ContentLocator, Reference};

use crate::error::{ResolveError, ResolveResult};
use crate::method::execute;
use crate::methods::{
    GetActualLocatorMethod, GetAspectsMethod, GetParentReferenceMethod, GetTypeMethod,
    HasAspectMethod,
};
use crate::service::ContentService;

/// Answers node-service questions about references over one content service.
pub struct Resolver<S> {
    service: S,
}

impl<S: ContentService> Resolver<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Virtual references always exist; node references exist if their
    /// content does.
    pub fn exists(&self, reference: &Reference) -> ResolveResult<bool> {
        match reference.locator() {
            Some(locator) => self
                .service
                .exists(locator)
                .map_err(ResolveError::service("exists")),
            None => Ok(true),
        }
    }

    pub fn type_of(&self, reference: &Reference) -> ResolveResult<String> {
        execute(&GetTypeMethod::new(&self.service), reference)
    }

    pub fn aspects_of(&self, reference: &Reference) -> ResolveResult<BTreeSet<String>> {
        execute(&GetAspectsMethod::new(&self.service), reference)
    }

    pub fn has_aspect(&self, reference: &Reference, aspect: &str) -> ResolveResult<bool> {
        execute(&HasAspectMethod::new(&self.service, aspect), reference)
    }

    pub fn actual_locator(&self, reference: &Reference) -> ResolveResult<ContentLocator> {
        execute(&GetActualLocatorMethod::new(&self.service), reference)
    }

    pub fn parent_of(&self, reference: &Reference) -> ResolveResult<Option<Reference>> {
        execute(&GetParentReferenceMethod, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryContentService;
    use crate::model::{VIRTUAL_ASPECT, VIRTUAL_DOCUMENT_ASPECT};
    use std::sync::Arc;
    use vref_types::{Resource, StoreId};

    fn doc(id: &str) -> ContentLocator {
        ContentLocator::new(StoreId::workspace(), id)
    }

    fn resolver() -> Resolver<InMemoryContentService> {
        let service = InMemoryContentService::new();
        service.put_node(doc("home"), "cm:folder", ["cm:auditable"]).unwrap();
        service.put_node(doc("memo"), "cm:content", ["cm:titled"]).unwrap();
        Resolver::new(service)
    }

    #[test]
    fn walks_a_virtual_tree() {
        let resolver = resolver();
        let root = Reference::virtual_ref(
            Resource::classpath("/org/vref/templates/smart.json"),
            "/",
            Resource::locator(doc("home")),
        );
        let inner = root.with_template_path("/2/1").unwrap();
        let memo = Reference::node(doc("memo"), inner.clone());

        assert!(resolver.exists(&inner).unwrap());
        assert!(resolver.exists(&memo).unwrap());
        assert_eq!(resolver.type_of(&memo).unwrap(), "cm:content");
        assert!(resolver.has_aspect(&memo, VIRTUAL_DOCUMENT_ASPECT).unwrap());
        assert!(resolver.has_aspect(&inner, VIRTUAL_ASPECT).unwrap());
        assert!(resolver.aspects_of(&root).unwrap().contains("cm:auditable"));
        assert!(!resolver.aspects_of(&inner).unwrap().contains("cm:auditable"));
        assert_eq!(resolver.actual_locator(&inner).unwrap(), doc("home"));

        let mut chain = vec![];
        let mut current = Some(memo);
        while let Some(reference) = current {
            current = resolver.parent_of(&reference).unwrap();
            chain.push(reference);
        }
        let paths: Vec<_> = chain.iter().map(|r| r.template_path()).collect();
        assert_eq!(paths, [None, Some("/2/1"), Some("/2"), Some("/")]);
    }

    #[test]
    fn removed_content_no_longer_exists() {
        let resolver = resolver();
        let memo = Reference::node(
            doc("memo"),
            Reference::virtual_ref(Resource::classpath("/t"), "/", Resource::path("/p")),
        );
        resolver.service().remove_node(&doc("memo")).unwrap();
        assert!(!resolver.exists(&memo).unwrap());
    }

    #[test]
    fn shared_service() {
        let service = Arc::new(InMemoryContentService::new());
        service.put_node(doc("home"), "cm:folder", ["cm:auditable"]).unwrap();
        let resolver = Resolver::new(service.clone());
        let root = Reference::virtual_ref(Resource::classpath("/t"), "/", Resource::locator(doc("home")));

        service.add_aspect(&doc("home"), "cm:versionable").unwrap();
        assert!(resolver.has_aspect(&root, "cm:versionable").unwrap());
    }
}
