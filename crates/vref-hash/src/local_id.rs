//! Radix re-encoding of store-local ids.
//!
//! Canonical UUIDs (lowercase, hyphenated 8-4-4-4-12) are read as a 128-bit
//! integer and written in the configured radix with no marker. Every other
//! id is read as a big-endian byte string behind a `0x01` sentinel byte and
//! written in the same radix behind [`NON_UUID_MARKER`]. The radix alphabet
//! is lowercase `0-9a-z`, so the uppercase marker never starts a UUID
//! encoding and decoding can dispatch on it.

use num_bigint::BigUint;
use uuid::Uuid;

use crate::error::{HashError, HashResult};

/// Radix used unless configured otherwise.
pub const DEFAULT_RADIX: u32 = 36;

/// Prefix of encodings of ids that are not canonical UUIDs.
pub const NON_UUID_MARKER: char = 'X';

/// Keeps empty ids and leading NUL bytes alive through the integer form.
const SENTINEL: u8 = 0x01;

/// Length of a hyphenated UUID.
const UUID_TEXT_LEN: usize = 36;

/// Re-encodes local ids in a fixed radix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalIdHasher {
    radix: u32,
}

impl LocalIdHasher {
    /// Create a hasher for `radix` (2..=36).
    pub fn new(radix: u32) -> HashResult<Self> {
        if !(2..=36).contains(&radix) {
            return Err(HashError::InvalidRadix(radix));
        }
        Ok(Self { radix })
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Encode `id`. Never fails: every string has an encoding.
    pub fn hash(&self, id: &str) -> String {
        match canonical_uuid(id) {
            Some(uuid) => BigUint::from(uuid.as_u128()).to_str_radix(self.radix),
            None => {
                let mut bytes = Vec::with_capacity(id.len() + 1);
                bytes.push(SENTINEL);
                bytes.extend_from_slice(id.as_bytes());
                let digits = BigUint::from_bytes_be(&bytes).to_str_radix(self.radix);
                format!("{NON_UUID_MARKER}{digits}")
            }
        }
    }

    /// Decode a value produced by [`hash`](Self::hash).
    pub fn lookup(&self, hashed: &str) -> HashResult<String> {
        match hashed.strip_prefix(NON_UUID_MARKER) {
            Some(digits) => {
                let bytes = parse_digits(hashed, digits, self.radix)?.to_bytes_be();
                match bytes.split_first() {
                    Some((&SENTINEL, rest)) => String::from_utf8(rest.to_vec())
                        .map_err(|e| malformed(hashed, format!("id is not UTF-8: {e}"))),
                    _ => Err(malformed(hashed, "missing sentinel byte".into())),
                }
            }
            None => {
                let bytes = parse_digits(hashed, hashed, self.radix)?.to_bytes_be();
                if bytes.len() > 16 {
                    return Err(malformed(hashed, "value exceeds 128 bits".into()));
                }
                let mut raw = [0u8; 16];
                raw[16 - bytes.len()..].copy_from_slice(&bytes);
                Ok(Uuid::from_bytes(raw).hyphenated().to_string())
            }
        }
    }
}

impl Default for LocalIdHasher {
    fn default() -> Self {
        Self {
            radix: DEFAULT_RADIX,
        }
    }
}

/// Returns the UUID if `id` is in canonical lowercase hyphenated form.
pub fn canonical_uuid(id: &str) -> Option<Uuid> {
    if id.len() != UUID_TEXT_LEN {
        return None;
    }
    let uuid = Uuid::parse_str(id).ok()?;
    (uuid.hyphenated().to_string() == id).then_some(uuid)
}

/// Parse lowercase radix digits, rejecting anything `to_str_radix` would not emit.
pub(crate) fn parse_digits(hashed: &str, digits: &str, radix: u32) -> HashResult<BigUint> {
    if digits.is_empty() {
        return Err(malformed(hashed, "no digits".into()));
    }
    if let Some(ch) = digits
        .chars()
        .find(|c| c.is_ascii_uppercase() || c.to_digit(radix).is_none())
    {
        return Err(malformed(hashed, format!("{ch:?} is not a radix-{radix} digit")));
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| malformed(hashed, "unparseable digits".into()))
}

pub(crate) fn malformed(value: &str, reason: String) -> HashError {
    HashError::MalformedHash {
        value: value.to_string(),
        reason,
    }
}
