//! The protocol methods.
//!
//! Each method is a small struct holding what it needs (usually the content
//! service) and implementing [`ProtocolMethod`].

use std::collections::BTreeSet;

use tracing::debug;
use vref_types::{is_root_path, ContentLocator, Location, Reference, Resource, ROOT_PATH};

use crate::error::{ResolveError, ResolveResult};
use crate::method::ProtocolMethod;
use crate::model::{TITLED_ASPECT, VIRTUAL_ASPECT, VIRTUAL_DOCUMENT_ASPECT, VIRTUAL_FOLDER_TYPE};
use crate::service::ContentService;

/// Resolve a repository resource to the locator of the content behind it.
pub fn resolve_resource(
    service: &dyn ContentService,
    resource: &Resource,
) -> ResolveResult<ContentLocator> {
    match resource {
        Resource::Repository(Location::ContentLocator(locator)) => Ok(locator.clone()),
        Resource::Repository(Location::RepositoryPath(path)) => service
            .resolve_path(path)
            .map_err(ResolveError::service("resolve_path"))?
            .ok_or_else(|| ResolveError::Unresolved { path: path.clone() }),
        Resource::Classpath(_) => Err(ResolveError::NotRepository {
            resource: resource.to_string(),
        }),
    }
}

/// The content type.
pub struct GetTypeMethod<'s> {
    service: &'s dyn ContentService,
}

impl<'s> GetTypeMethod<'s> {
    pub fn new(service: &'s dyn ContentService) -> Self {
        Self { service }
    }
}

impl ProtocolMethod for GetTypeMethod<'_> {
    type Output = String;

    fn execute_node(&self, _: &Reference, locator: &ContentLocator) -> ResolveResult<String> {
        self.service
            .type_of(locator)
            .map_err(ResolveError::service("type_of"))
    }

    fn execute_virtual(&self, _: &Reference) -> ResolveResult<String> {
        Ok(VIRTUAL_FOLDER_TYPE.to_string())
    }
}

/// The full aspect set.
///
/// A virtual folder only shows the aspects of its actual content at the root
/// of its template tree; deeper folders are purely virtual.
pub struct GetAspectsMethod<'s> {
    service: &'s dyn ContentService,
}

impl<'s> GetAspectsMethod<'s> {
    pub fn new(service: &'s dyn ContentService) -> Self {
        Self { service }
    }
}

impl ProtocolMethod for GetAspectsMethod<'_> {
    type Output = BTreeSet<String>;

    fn execute_node(&self, _: &Reference, locator: &ContentLocator) -> ResolveResult<Self::Output> {
        let mut aspects = self
            .service
            .aspects_of(locator)
            .map_err(ResolveError::service("aspects_of"))?;
        aspects.insert(VIRTUAL_DOCUMENT_ASPECT.to_string());
        Ok(aspects)
    }

    fn execute_virtual(&self, reference: &Reference) -> ResolveResult<Self::Output> {
        let mut aspects: BTreeSet<String> = [VIRTUAL_ASPECT, TITLED_ASPECT]
            .into_iter()
            .map(String::from)
            .collect();
        if reference.template_path().is_some_and(is_root_path) {
            let actual = resolve_resource(self.service, reference.actual_resource())?;
            let backing = self
                .service
                .aspects_of(&actual)
                .map_err(ResolveError::service("aspects_of"))?;
            debug!(%actual, count = backing.len(), "root folder shows backing aspects");
            aspects.extend(backing);
        }
        Ok(aspects)
    }
}

/// Whether one aspect is present.
///
/// The virtual marker aspects are answered from the protocol alone; any
/// other aspect is asked of the actual content.
pub struct HasAspectMethod<'s, 'a> {
    service: &'s dyn ContentService,
    aspect: &'a str,
}

impl<'s, 'a> HasAspectMethod<'s, 'a> {
    pub fn new(service: &'s dyn ContentService, aspect: &'a str) -> Self {
        Self { service, aspect }
    }

    fn delegate(&self, locator: &ContentLocator) -> ResolveResult<bool> {
        self.service
            .has_aspect(locator, self.aspect)
            .map_err(ResolveError::service("has_aspect"))
    }
}

impl ProtocolMethod for HasAspectMethod<'_, '_> {
    type Output = bool;

    fn execute_node(&self, _: &Reference, locator: &ContentLocator) -> ResolveResult<bool> {
        match self.aspect {
            VIRTUAL_ASPECT | TITLED_ASPECT => Ok(false),
            VIRTUAL_DOCUMENT_ASPECT => Ok(true),
            _ => self.delegate(locator),
        }
    }

    fn execute_virtual(&self, reference: &Reference) -> ResolveResult<bool> {
        match self.aspect {
            VIRTUAL_ASPECT | TITLED_ASPECT => Ok(true),
            VIRTUAL_DOCUMENT_ASPECT => Ok(false),
            _ => {
                let actual = resolve_resource(self.service, reference.actual_resource())?;
                self.delegate(&actual)
            }
        }
    }
}

/// The locator of the real content behind a reference.
pub struct GetActualLocatorMethod<'s> {
    service: &'s dyn ContentService,
}

impl<'s> GetActualLocatorMethod<'s> {
    pub fn new(service: &'s dyn ContentService) -> Self {
        Self { service }
    }
}

impl ProtocolMethod for GetActualLocatorMethod<'_> {
    type Output = ContentLocator;

    fn execute_node(&self, _: &Reference, locator: &ContentLocator) -> ResolveResult<ContentLocator> {
        Ok(locator.clone())
    }

    fn execute_virtual(&self, reference: &Reference) -> ResolveResult<ContentLocator> {
        resolve_resource(self.service, reference.actual_resource())
    }
}

/// The enclosing reference, or `None` at the top of a virtual tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct GetParentReferenceMethod;

impl ProtocolMethod for GetParentReferenceMethod {
    type Output = Option<Reference>;

    fn execute_node(&self, reference: &Reference, _: &ContentLocator) -> ResolveResult<Self::Output> {
        Ok(reference.parent().cloned())
    }

    fn execute_virtual(&self, reference: &Reference) -> ResolveResult<Self::Output> {
        let Some(path) = reference.template_path() else {
            return Ok(None);
        };
        if is_root_path(path) {
            return Ok(None);
        }
        Ok(reference.with_template_path(parent_path(path)))
    }
}

/// Drop the last segment of a template path.
fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => ROOT_PATH,
        Some(cut) => &path[..cut],
    }
}
