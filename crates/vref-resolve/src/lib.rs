//! Protocol dispatch for virtual references.
//!
//! Questions a node service would answer (type, aspects, actual content,
//! parent) have one answer per reference protocol. Each question is a
//! [`ProtocolMethod`]; [`execute`] picks the branch for a reference's
//! protocol. Real content is reached through a [`ContentService`].
//!
//! # Modules
//!
//! - [`method`] — The [`ProtocolMethod`] trait and [`execute`]
//! - [`methods`] — Type, aspect, actual-locator and parent methods
//! - [`service`] — The [`ContentService`] trait
//! - [`memory`] — In-memory [`InMemoryContentService`]
//! - [`resolver`] — [`Resolver`], all methods over one service

pub mod error;
pub mod memory;
pub mod method;
pub mod methods;
pub mod model;
pub mod resolver;
pub mod service;

pub use error::{ResolveError, ResolveResult, ServiceError, ServiceResult};
pub use memory::InMemoryContentService;
pub use method::{execute, ProtocolMethod};
pub use methods::{
    resolve_resource, GetActualLocatorMethod, GetAspectsMethod, GetParentReferenceMethod,
    GetTypeMethod, HasAspectMethod,
};
pub use model::{TITLED_ASPECT, VIRTUAL_ASPECT, VIRTUAL_DOCUMENT_ASPECT, VIRTUAL_FOLDER_TYPE};
pub use resolver::Resolver;
pub use service::ContentService;
