//! What a reference points at: a repository location or a classpath asset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::locator::ContentLocator;

/// A place in the repository, either addressed directly or by path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// A stored item addressed by its locator.
    ContentLocator(ContentLocator),
    /// A slash-delimited repository path, e.g. `/app:company_home/cm:foo`.
    RepositoryPath(String),
}

impl Location {
    /// Returns the locator if this location addresses an item directly.
    pub fn as_locator(&self) -> Option<&ContentLocator> {
        match self {
            Location::ContentLocator(locator) => Some(locator),
            Location::RepositoryPath(_) => None,
        }
    }
}

impl From<ContentLocator> for Location {
    fn from(locator: ContentLocator) -> Self {
        Location::ContentLocator(locator)
    }
}

/// The payload of a reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Something stored in the repository.
    Repository(Location),
    /// A non-repository asset (templates, scripts) named by its classpath.
    Classpath(String),
}

impl Resource {
    /// Shorthand for a repository resource addressed by locator.
    pub fn locator(locator: ContentLocator) -> Self {
        Resource::Repository(Location::ContentLocator(locator))
    }

    /// Shorthand for a repository resource addressed by path.
    pub fn path(path: impl Into<String>) -> Self {
        Resource::Repository(Location::RepositoryPath(path.into()))
    }

    pub fn classpath(path: impl Into<String>) -> Self {
        Resource::Classpath(path.into())
    }

    pub fn as_location(&self) -> Option<&Location> {
        match self {
            Resource::Repository(location) => Some(location),
            Resource::Classpath(_) => None,
        }
    }

    /// Returns the locator if this is a repository resource addressed by locator.
    pub fn as_locator(&self) -> Option<&ContentLocator> {
        self.as_location().and_then(Location::as_locator)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Repository(Location::ContentLocator(locator)) => write!(f, "{locator}"),
            Resource::Repository(Location::RepositoryPath(path)) => write!(f, "path:{path}"),
            Resource::Classpath(path) => write!(f, "classpath:{path}"),
        }
    }
}
