//! Wire codec for virtual references.
//!
//! References travel as ASCII strings of `-`-delimited tokens. The
//! [`Stringifier`] writes them and the [`Parser`] reads them back, either
//! spelling every value out (literal encoding) or compressing through a
//! [`HashRegistry`](vref_hash::HashRegistry) (hashed encoding). A
//! [`ReferenceCodec`] prefixes the encoding so strings are self-describing,
//! and can embed a reference in a content locator.
//!
//! ```text
//! v-3-/org/vref/templates/smart.json-r-0-workspace-SpacesStore-doc
//! │ │                                │ └ actual resource: literal locator
//! │ │                                └ template path: root
//! │ └ template: literal classpath
//! └ protocol: virtual
//! ```

pub mod cursor;
pub mod envelope;
pub mod error;
pub mod parse;
pub mod stringify;
pub mod tokens;

pub use cursor::Cursor;
pub use envelope::{Encoding, ReferenceCodec, REFERENCE_ID_MARKER};
pub use error::{CodecError, CodecResult, ParseError};
pub use parse::{Parser, MAX_NESTING_DEPTH};
pub use stringify::Stringifier;
