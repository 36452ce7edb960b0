//! Self-describing reference strings and their embedding in content locators.
//!
//! An envelope is one encoding token followed by the stringified reference,
//! so a decoder can tell how to parse it without out-of-band state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vref_hash::HashRegistry;
use vref_types::{ContentLocator, Reference, StoreId};

use crate::error::{CodecError, CodecResult};
use crate::parse::Parser;
use crate::stringify::Stringifier;

/// Leading character of a locator id that carries a reference.
pub const REFERENCE_ID_MARKER: char = 'v';

/// How the body of an envelope was produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Every value spelled out; needs no stores to decode.
    Literal,
    /// Compressed through the hash stores.
    #[default]
    Hashed,
}

impl Encoding {
    pub fn token(&self) -> char {
        match self {
            Encoding::Literal => 'l',
            Encoding::Hashed => 'h',
        }
    }

    pub fn from_token(token: char) -> Option<Self> {
        match token {
            'l' => Some(Encoding::Literal),
            'h' => Some(Encoding::Hashed),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Literal => "literal",
            Encoding::Hashed => "hashed",
        })
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" => Ok(Encoding::Literal),
            "hashed" => Ok(Encoding::Hashed),
            other => Err(format!("unknown encoding '{other}' (expected literal or hashed)")),
        }
    }
}

/// Encodes and decodes enveloped references against one [`HashRegistry`].
#[derive(Clone, Debug)]
pub struct ReferenceCodec {
    registry: HashRegistry,
}

impl ReferenceCodec {
    pub fn new(registry: HashRegistry) -> Self {
        Self { registry }
    }

    /// A codec over the default hash stores.
    pub fn standard() -> CodecResult<Self> {
        Ok(Self::new(HashRegistry::standard()?))
    }

    pub fn registry(&self) -> &HashRegistry {
        &self.registry
    }

    pub fn stringifier(&self, encoding: Encoding) -> Stringifier<'_> {
        match encoding {
            Encoding::Literal => Stringifier::literal(),
            Encoding::Hashed => Stringifier::hashed(&self.registry),
        }
    }

    pub fn parser(&self, encoding: Encoding) -> Parser<'_> {
        match encoding {
            Encoding::Literal => Parser::literal(),
            Encoding::Hashed => Parser::hashed(&self.registry),
        }
    }

    pub fn encode(&self, reference: &Reference, encoding: Encoding) -> CodecResult<String> {
        let body = self.stringifier(encoding).stringify(reference)?;
        Ok(format!("{}{body}", encoding.token()))
    }

    /// Decode an envelope. Parse error positions are relative to the body.
    pub fn decode(&self, text: &str) -> CodecResult<Reference> {
        let mut chars = text.chars();
        let first = chars.next();
        let encoding = first
            .and_then(Encoding::from_token)
            .ok_or(CodecError::UnknownEncoding(first))?;
        self.parser(encoding).parse(chars.as_str())
    }

    /// Embed `reference` in a content locator on the store of the content
    /// that backs it, or the default workspace store.
    pub fn to_locator(&self, reference: &Reference, encoding: Encoding) -> CodecResult<ContentLocator> {
        let store = reference
            .actual_resource()
            .as_locator()
            .map(|locator| locator.store().clone())
            .unwrap_or_else(StoreId::workspace);
        let envelope = self.encode(reference, encoding)?;
        Ok(ContentLocator::new(store, format!("{REFERENCE_ID_MARKER}{envelope}")))
    }

    /// Returns `true` if the locator's id looks like an embedded reference.
    ///
    /// Only the marker and the encoding token are checked, so ordinary ids
    /// that happen to start with them (`vhs-tape`, `vlog`) count as references
    /// too. For those [`from_locator`](Self::from_locator) reports the body's
    /// parse error rather than [`CodecError::NotReference`].
    pub fn is_reference(locator: &ContentLocator) -> bool {
        let mut chars = locator.id().chars();
        chars.next() == Some(REFERENCE_ID_MARKER)
            && chars.next().and_then(Encoding::from_token).is_some()
    }

    pub fn from_locator(&self, locator: &ContentLocator) -> CodecResult<Reference> {
        if !Self::is_reference(locator) {
            return Err(CodecError::NotReference(locator.to_string()));
        }
        self.decode(&locator.id()[REFERENCE_ID_MARKER.len_utf8()..])
    }
}
