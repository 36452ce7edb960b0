//! Compression of numeric template paths such as `/1/12/3`.
//!
//! Template paths of virtual folders are mostly numeric segments. Read with
//! `/` as the base-11 digit `a`, a numeric path is a base-11 numeral whose
//! leading digit is never zero, so it can be re-emitted in base 36 and
//! recovered exactly, leading zeros inside segments included.

use num_bigint::BigUint;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use vref_types::is_root_path;

use crate::error::HashResult;
use crate::local_id::{malformed, parse_digits};
use crate::path::{HashedPath, PathHasher};

/// Longest numeric prefix ending at a segment boundary, plus the rest.
static NUMERIC_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^((?:/[0-9]+)+)(/.*)?$").expect("Invalid regex"));

/// Radix of the numeral a numeric path spells out.
const PATH_RADIX: u32 = 11;
/// Radix of the hashed form.
const HASH_RADIX: u32 = 36;
/// The base-11 digit standing in for `/`.
const SEPARATOR_DIGIT: char = 'a';

/// Hashes template paths made of numeric segments.
///
/// The root path `/` is never hashed; it stays a literal so the codec can
/// give it its own production.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumericPathHasher;

impl NumericPathHasher {
    pub fn new() -> Self {
        Self
    }

    fn lookup_numeric(&self, hashed: &str) -> HashResult<String> {
        let numeral = parse_digits(hashed, hashed, HASH_RADIX)?.to_str_radix(PATH_RADIX);
        let well_formed = numeral.starts_with(SEPARATOR_DIGIT)
            && !numeral.ends_with(SEPARATOR_DIGIT)
            && !numeral.contains("aa");
        if !well_formed {
            return Err(malformed(hashed, "not a numeric path".into()));
        }
        Ok(numeral.replace(SEPARATOR_DIGIT, "/"))
    }
}

impl PathHasher for NumericPathHasher {
    fn hash(&self, path: &str) -> HashedPath {
        if is_root_path(path) {
            return HashedPath::Literal(path.to_string());
        }
        let Some(captures) = NUMERIC_PREFIX.captures(path) else {
            debug!(path, "template path has no numeric prefix");
            return HashedPath::Literal(path.to_string());
        };
        let numeric = &captures[1];
        let numeral = numeric.replace('/', &SEPARATOR_DIGIT.to_string());
        let Some(value) = BigUint::parse_bytes(numeral.as_bytes(), PATH_RADIX) else {
            return HashedPath::Literal(path.to_string());
        };
        let hashed = value.to_str_radix(HASH_RADIX);
        match captures.get(2) {
            Some(rest) => HashedPath::Mixed {
                hashed,
                literal: rest.as_str().to_string(),
            },
            None => HashedPath::Hashed(hashed),
        }
    }

    fn lookup(&self, hashed: &HashedPath) -> HashResult<String> {
        let prefix = match hashed.hashed_part() {
            Some(code) => self.lookup_numeric(code)?,
            None => String::new(),
        };
        Ok(prefix + hashed.literal_part().unwrap_or(""))
    }
}
