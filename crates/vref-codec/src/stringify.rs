//! Reference → wire string.

use tracing::debug;
use vref_hash::{HashRegistry, HashedPath, PathHasher, StoredPathHasher};
use vref_types::{
    is_root_path, ContentLocator, Location, Parameter, Protocol, Reference, Resource, TypeError,
};

use crate::error::{CodecError, CodecResult};
use crate::parse::MAX_NESTING_DEPTH;
use crate::tokens::{self, escape_literal, DELIMITER};

/// Renders references as delimiter-joined token strings.
///
/// A literal stringifier needs no stores and accepts every reference. A
/// hashed one compresses through a [`HashRegistry`] and fails outright when a
/// content locator's store has no registered code.
#[derive(Clone, Copy, Debug)]
pub struct Stringifier<'r> {
    hashes: Option<&'r HashRegistry>,
}

impl Stringifier<'static> {
    pub fn literal() -> Self {
        Self { hashes: None }
    }
}

impl<'r> Stringifier<'r> {
    pub fn hashed(hashes: &'r HashRegistry) -> Self {
        Self {
            hashes: Some(hashes),
        }
    }

    pub fn is_hashed(&self) -> bool {
        self.hashes.is_some()
    }

    pub fn stringify(&self, reference: &Reference) -> CodecResult<String> {
        let mut out = Vec::new();
        self.push_reference(&mut out, reference, 1)?;
        Ok(out.join(&DELIMITER.to_string()))
    }

    /// `depth` counts the references enclosing `reference`, itself included,
    /// the same way the parser counts them.
    fn push_reference(
        &self,
        out: &mut Vec<String>,
        reference: &Reference,
        depth: usize,
    ) -> CodecResult<()> {
        if depth > MAX_NESTING_DEPTH {
            return Err(CodecError::TooDeep {
                max: MAX_NESTING_DEPTH,
            });
        }
        debug!(protocol = %reference.protocol(), hashed = self.is_hashed(), depth, "stringify reference");
        match (reference.protocol(), reference.parameters()) {
            (Protocol::Node, [Parameter::Reference(parent)]) => {
                out.push(tokens::protocol::NODE.into());
                self.push_resource(out, reference.resource())?;
                self.push_reference(out, parent, depth + 1)
            }
            (Protocol::Virtual, [Parameter::String(path), Parameter::Resource(actual)]) => {
                out.push(tokens::protocol::VIRTUAL.into());
                self.push_resource(out, reference.resource())?;
                self.push_template_path(out, path);
                self.push_resource(out, actual)
            }
            (
                Protocol::Vanilla,
                [Parameter::String(path), Parameter::Resource(actual), Parameter::Resource(vanilla)],
            ) => {
                out.push(tokens::protocol::VANILLA.into());
                self.push_resource(out, reference.resource())?;
                self.push_template_path(out, path);
                self.push_resource(out, actual)?;
                self.push_resource(out, vanilla)
            }
            (protocol, _) => Err(TypeError::InvalidShape {
                protocol: protocol.name(),
                reason: "parameter layout does not match protocol".into(),
            }
            .into()),
        }
    }

    fn push_resource(&self, out: &mut Vec<String>, resource: &Resource) -> CodecResult<()> {
        match resource {
            Resource::Repository(Location::ContentLocator(locator)) => {
                self.push_locator(out, locator)
            }
            Resource::Repository(Location::RepositoryPath(path)) => {
                let codes = [
                    tokens::resource::HASHED_PATH,
                    tokens::resource::LITERAL_PATH,
                    tokens::resource::MIXED_PATH,
                ];
                self.push_path(out, path, self.hashes.map(HashRegistry::paths), codes);
                Ok(())
            }
            Resource::Classpath(path) => {
                let codes = [
                    tokens::resource::HASHED_CLASSPATH,
                    tokens::resource::LITERAL_CLASSPATH,
                    tokens::resource::MIXED_CLASSPATH,
                ];
                self.push_path(out, path, self.hashes.map(HashRegistry::classpaths), codes);
                Ok(())
            }
        }
    }

    fn push_locator(&self, out: &mut Vec<String>, locator: &ContentLocator) -> CodecResult<()> {
        match self.hashes {
            Some(hashes) => {
                let store = hashes.store_ids().hash(locator.store())?;
                let id = hashes.local_ids().hash(locator.id());
                out.push(tokens::resource::HASHED_LOCATOR.into());
                out.push(format!("{store}{id}"));
            }
            None => {
                out.push(tokens::resource::LITERAL_LOCATOR.into());
                out.push(escape_literal(locator.store().protocol()).into_owned());
                out.push(escape_literal(locator.store().identifier()).into_owned());
                out.push(escape_literal(locator.id()).into_owned());
            }
        }
        Ok(())
    }

    /// Emit one of `[hashed, literal, mixed]` depending on the tier reached.
    fn push_path(
        &self,
        out: &mut Vec<String>,
        path: &str,
        hasher: Option<&StoredPathHasher>,
        [hashed_code, literal_code, mixed_code]: [&str; 3],
    ) {
        let hashed = match hasher {
            Some(hasher) => hasher.hash(path),
            None => HashedPath::Literal(path.to_string()),
        };
        match hashed {
            HashedPath::Hashed(code) => {
                out.push(hashed_code.into());
                out.push(code);
            }
            HashedPath::Literal(literal) => {
                out.push(literal_code.into());
                out.push(escape_literal(&literal).into_owned());
            }
            HashedPath::Mixed { hashed, literal } => {
                out.push(mixed_code.into());
                out.push(hashed);
                out.push(escape_literal(&literal).into_owned());
            }
        }
    }

    fn push_template_path(&self, out: &mut Vec<String>, path: &str) {
        if is_root_path(path) {
            out.push(tokens::template_path::ROOT.into());
            return;
        }
        let hashed = match self.hashes {
            Some(hashes) => hashes.numeric_paths().hash(path),
            None => HashedPath::Literal(path.to_string()),
        };
        match hashed {
            HashedPath::Hashed(code) => {
                out.push(tokens::template_path::HASHED.into());
                out.push(code);
            }
            HashedPath::Literal(literal) => {
                out.push(tokens::template_path::LITERAL.into());
                out.push(escape_literal(&literal).into_owned());
            }
            HashedPath::Mixed { hashed, literal } => {
                out.push(tokens::template_path::MIXED.into());
                out.push(hashed);
                out.push(escape_literal(&literal).into_owned());
            }
        }
    }
}
