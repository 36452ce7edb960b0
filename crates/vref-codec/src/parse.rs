//! Wire string → reference, by recursive descent.
//!
//! Every production is a function from a [`Cursor`] to the parsed value and
//! the cursor after it. Failures carry the index of the offending token.

use tracing::debug;
use vref_hash::{HashRegistry, HashedPath, PathHasher, Tier, STORE_HASH_WIDTH};
use vref_types::{ContentLocator, Parameter, Protocol, Reference, Resource, StoreId, ROOT_PATH};

use crate::cursor::Cursor;
use crate::error::{CodecResult, ParseError};
use crate::tokens::{self, tokenize, unescape_literal};

/// Deepest chain of nested references the parser will follow.
pub const MAX_NESTING_DEPTH: usize = 64;

type Parsed<'a, T> = Result<(T, Cursor<'a>), ParseError>;

/// Parses wire strings back into references.
///
/// A literal parser accepts only productions that need no stores: literal
/// locators and paths, and numeric template paths. A hashed parser resolves
/// codes through the same [`HashRegistry`] the stringifier used.
#[derive(Clone, Copy, Debug)]
pub struct Parser<'r> {
    hashes: Option<&'r HashRegistry>,
}

impl Parser<'static> {
    pub fn literal() -> Self {
        Self { hashes: None }
    }
}

impl<'r> Parser<'r> {
    pub fn hashed(hashes: &'r HashRegistry) -> Self {
        Self {
            hashes: Some(hashes),
        }
    }

    /// Parse a whole wire string. Tokens left over after the outermost
    /// reference are an error.
    pub fn parse(&self, input: &str) -> CodecResult<Reference> {
        let tokens = tokenize(input);
        let (reference, cursor) = self.parse_reference(Cursor::new(&tokens), 1)?;
        if let Some(token) = cursor.current_token() {
            return Err(ParseError::TrailingTokens {
                position: cursor.position(),
                token: token.to_string(),
            }
            .into());
        }
        Ok(reference)
    }

    /// Parse one reference starting at `cursor`; `depth` counts the
    /// references enclosing it, itself included.
    pub fn parse_reference<'a>(&self, cursor: Cursor<'a>, depth: usize) -> Parsed<'a, Reference> {
        let at = cursor;
        let (code, cursor) = cursor.take("protocol code")?;
        if depth > MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep {
                position: at.position(),
                token: code.to_string(),
                max: MAX_NESTING_DEPTH,
            });
        }
        let protocol = match code {
            tokens::protocol::NODE => Protocol::Node,
            tokens::protocol::VIRTUAL => Protocol::Virtual,
            tokens::protocol::VANILLA => Protocol::Vanilla,
            _ => {
                return Err(ParseError::UnknownCode {
                    position: at.position(),
                    token: code.to_string(),
                    expected: "protocol",
                })
            }
        };
        let resource_at = cursor;
        let (resource, cursor) = self.parse_resource(cursor)?;
        let (parameters, cursor) = match protocol {
            Protocol::Node => {
                let (parent, cursor) = self.parse_reference(cursor, depth + 1)?;
                (vec![Parameter::Reference(Box::new(parent))], cursor)
            }
            Protocol::Virtual => {
                let (path, cursor) = self.parse_template_path(cursor)?;
                let (actual, cursor) = self.parse_resource(cursor)?;
                (vec![Parameter::String(path), Parameter::Resource(actual)], cursor)
            }
            Protocol::Vanilla => {
                let (path, cursor) = self.parse_template_path(cursor)?;
                let (actual, cursor) = self.parse_resource(cursor)?;
                let (vanilla, cursor) = self.parse_resource(cursor)?;
                let parameters = vec![
                    Parameter::String(path),
                    Parameter::Resource(actual),
                    Parameter::Resource(vanilla),
                ];
                (parameters, cursor)
            }
        };
        debug!(%protocol, position = at.position(), depth, "parsed reference");
        // Only a node's resource kind can be wrong once the grammar matched.
        let reference = Reference::new(protocol, resource, parameters).map_err(|e| {
            ParseError::InvalidShape {
                position: resource_at.position(),
                token: resource_at.current_token().unwrap_or_default().to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok((reference, cursor))
    }

    fn parse_resource<'a>(&self, cursor: Cursor<'a>) -> Parsed<'a, Resource> {
        let at = cursor;
        let (code, cursor) = cursor.take("resource code")?;
        let classpaths = self.hashes.map(|h| h.classpaths() as &dyn PathHasher);
        let paths = self.hashes.map(|h| h.paths() as &dyn PathHasher);
        let (production, tier) = match code {
            tokens::resource::LITERAL_LOCATOR => return self.parse_literal_locator(cursor),
            tokens::resource::HASHED_LOCATOR => return self.parse_hashed_locator(at, cursor),
            tokens::resource::HASHED_CLASSPATH => (classpaths, Tier::Hashed),
            tokens::resource::LITERAL_CLASSPATH => (classpaths, Tier::Literal),
            tokens::resource::MIXED_CLASSPATH => (classpaths, Tier::Mixed),
            tokens::resource::HASHED_PATH => (paths, Tier::Hashed),
            tokens::resource::LITERAL_PATH => (paths, Tier::Literal),
            tokens::resource::MIXED_PATH => (paths, Tier::Mixed),
            _ => {
                return Err(ParseError::UnknownCode {
                    position: at.position(),
                    token: code.to_string(),
                    expected: "resource",
                })
            }
        };
        let (path, cursor) = parse_path(at, cursor, tier, production)?;
        let resource = match code {
            tokens::resource::HASHED_CLASSPATH
            | tokens::resource::LITERAL_CLASSPATH
            | tokens::resource::MIXED_CLASSPATH => Resource::classpath(path),
            _ => Resource::path(path),
        };
        Ok((resource, cursor))
    }

    fn parse_literal_locator<'a>(&self, cursor: Cursor<'a>) -> Parsed<'a, Resource> {
        let (protocol, cursor) = take_literal(cursor, "store protocol")?;
        let (identifier, cursor) = take_literal(cursor, "store identifier")?;
        let (id, cursor) = take_literal(cursor, "local id")?;
        let locator = ContentLocator::new(StoreId::new(protocol, identifier), id);
        Ok((Resource::locator(locator), cursor))
    }

    fn parse_hashed_locator<'a>(&self, at: Cursor<'a>, cursor: Cursor<'a>) -> Parsed<'a, Resource> {
        let hashes = self.require_hashes(at)?;
        let (token, next) = cursor.take("hashed locator")?;
        let unresolved = |reason: String| ParseError::UnresolvedCode {
            position: cursor.position(),
            token: token.to_string(),
            reason,
        };
        let split = token
            .char_indices()
            .nth(STORE_HASH_WIDTH)
            .map(|(index, _)| index)
            .ok_or_else(|| unresolved("too short for a store code and local id".into()))?;
        let store = hashes
            .store_ids()
            .lookup(&token[..split])
            .map_err(|e| unresolved(e.to_string()))?;
        let id = hashes
            .local_ids()
            .lookup(&token[split..])
            .map_err(|e| unresolved(e.to_string()))?;
        Ok((Resource::locator(ContentLocator::new(store, id)), next))
    }

    fn parse_template_path<'a>(&self, cursor: Cursor<'a>) -> Parsed<'a, String> {
        let at = cursor;
        let (code, cursor) = cursor.take("template path code")?;
        let numeric = self
            .hashes
            .map(|h| *h.numeric_paths())
            .unwrap_or_default();
        let tier = match code {
            tokens::template_path::ROOT => return Ok((ROOT_PATH.to_string(), cursor)),
            tokens::template_path::HASHED => Tier::Hashed,
            tokens::template_path::LITERAL => Tier::Literal,
            tokens::template_path::MIXED => Tier::Mixed,
            _ => {
                return Err(ParseError::UnknownCode {
                    position: at.position(),
                    token: code.to_string(),
                    expected: "template path",
                })
            }
        };
        parse_path(at, cursor, tier, Some(&numeric as &dyn PathHasher))
    }

    fn require_hashes(&self, at: Cursor<'_>) -> Result<&'r HashRegistry, ParseError> {
        self.hashes.ok_or_else(|| ParseError::UnresolvedCode {
            position: at.position(),
            token: at.current_token().unwrap_or_default().to_string(),
            reason: "hashed production needs hash stores".into(),
        })
    }
}

/// Parse the payload of a path production. `at` is the production code.
fn parse_path<'a>(
    at: Cursor<'a>,
    cursor: Cursor<'a>,
    tier: Tier,
    hasher: Option<&dyn PathHasher>,
) -> Parsed<'a, String> {
    if tier == Tier::Literal {
        return take_literal(cursor, "path literal");
    }
    let Some(hasher) = hasher else {
        return Err(ParseError::UnresolvedCode {
            position: at.position(),
            token: at.current_token().unwrap_or_default().to_string(),
            reason: "hashed production needs hash stores".into(),
        });
    };
    let (code, next) = cursor.take("path code")?;
    let (hashed, next) = match tier {
        Tier::Mixed => {
            let suffix_at = next;
            let (literal, next) = take_literal(next, "path suffix")?;
            if !literal.starts_with('/') {
                return Err(ParseError::InvalidLiteral {
                    position: suffix_at.position(),
                    token: suffix_at.current_token().unwrap_or_default().to_string(),
                    reason: "mixed path suffix must start with '/'".into(),
                });
            }
            let hashed = HashedPath::Mixed {
                hashed: code.to_string(),
                literal,
            };
            (hashed, next)
        }
        _ => (HashedPath::Hashed(code.to_string()), next),
    };
    let path = hasher
        .lookup(&hashed)
        .map_err(|e| ParseError::UnresolvedCode {
            position: cursor.position(),
            token: code.to_string(),
            reason: e.to_string(),
        })?;
    Ok((path, next))
}

fn take_literal<'a>(cursor: Cursor<'a>, expected: &'static str) -> Parsed<'a, String> {
    let (token, next) = cursor.take(expected)?;
    let text = unescape_literal(token).map_err(|reason| ParseError::InvalidLiteral {
        position: cursor.position(),
        token: token.to_string(),
        reason,
    })?;
    Ok((text, next))
}
