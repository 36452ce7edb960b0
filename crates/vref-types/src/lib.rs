//! Foundation types for virtual references.
//!
//! This crate provides the value types that the codec, hashers and resolvers
//! pass around. Every other vref crate depends on `vref-types`.
//!
//! # Key Types
//!
//! - [`StoreId`] — A content store: protocol name plus instance identifier
//! - [`ContentLocator`] — One stored item: store plus local id
//! - [`Location`] — A repository place, by locator or by path
//! - [`Resource`] — What a reference points at (repository or classpath)
//! - [`Parameter`] — Positional reference argument, possibly a nested reference
//! - [`Reference`] — The protocol-tagged pointer itself

pub mod error;
pub mod locator;
pub mod reference;
pub mod resource;

pub use error::TypeError;
pub use locator::{ContentLocator, StoreId};
pub use reference::{is_root_path, Parameter, Protocol, Reference, ReferenceParts, ROOT_PATH};
pub use resource::{Location, Resource};
