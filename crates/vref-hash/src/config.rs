use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HashError, HashResult};
use crate::local_id::DEFAULT_RADIX;

/// Bootstrap contents of the hash stores.
///
/// Each table maps a value to its code. Missing tables fall back to the
/// defaults, so a config file only has to list what it adds or changes.
///
/// ```toml
/// radix = 36
///
/// [paths]
/// "/app:company_home" = "A"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Radix for local-id re-encoding (2..=36).
    pub radix: u32,
    /// Store protocol names, one-character codes.
    pub store_protocols: BTreeMap<String, String>,
    /// Store instance identifiers, one-character codes.
    pub store_identifiers: BTreeMap<String, String>,
    /// Template and script classpaths.
    pub classpaths: BTreeMap<String, String>,
    /// Repository path prefixes.
    pub paths: BTreeMap<String, String>,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            radix: DEFAULT_RADIX,
            store_protocols: table(&[
                ("workspace", "1"),
                ("archive", "2"),
                ("user", "3"),
                ("system", "4"),
            ]),
            store_identifiers: table(&[
                ("SpacesStore", "1"),
                ("version2Store", "2"),
                ("lightWeightVersionStore", "3"),
                ("alfrescoUserStore", "4"),
                ("system", "5"),
            ]),
            classpaths: table(&[
                ("/org/vref/templates", "1"),
                ("/org/vref/templates/vanilla.js", "2"),
            ]),
            paths: table(&[
                ("/app:company_home", "1"),
                ("/app:company_home/app:dictionary", "2"),
                ("/app:company_home/app:dictionary/app:smart_folders", "3"),
                ("/app:company_home/st:sites", "4"),
                ("/app:company_home/app:user_homes", "5"),
            ]),
        }
    }
}

impl HashConfig {
    /// A configuration with no registered values at all.
    ///
    /// Useful for literal-only setups; hashed encoding of any content
    /// locator fails against it.
    pub fn empty() -> Self {
        Self {
            radix: DEFAULT_RADIX,
            store_protocols: BTreeMap::new(),
            store_identifiers: BTreeMap::new(),
            classpaths: BTreeMap::new(),
            paths: BTreeMap::new(),
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> HashResult<Self> {
        toml::from_str(text).map_err(|e| HashError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> HashResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> HashResult<String> {
        toml::to_string(self).map_err(|e| HashError::Config(e.to_string()))
    }
}

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(value, code)| (value.to_string(), code.to_string()))
        .collect()
}
