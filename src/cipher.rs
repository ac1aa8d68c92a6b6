//! Ciphers under attack.
//!
//! Sizes carry an `_exp` suffix: a block size of 128 means a space of 2^128
//! blocks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Query limit used when a cipher does not name one.
pub const DEFAULT_QUERY_LIMIT_EXP: u32 = 1000;

/// Key-whitening construction, which decides how many Grover iterates the
/// attack needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CipherType {
    /// Public permutation between two whitening keys.
    EvenMansour,
    /// Keyed block cipher between two whitening keys.
    Fx,
    /// Anything else read from a config file. Rejected by the attack.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CipherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CipherType::EvenMansour => "Even-Mansour",
            CipherType::Fx => "FX",
            CipherType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cipher {
    pub name: String,
    pub block_size_exp: u32,
    pub key_size_exp: u32,
    /// Whitening key size.
    pub pre_key_size_exp: u32,
    #[serde(rename = "type")]
    pub cipher_type: CipherType,
    #[serde(default = "default_query_limit")]
    pub query_limit_exp: u32,
    /// Variant selector within a cipher family; defaults to the block size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<u32>,
}

fn default_query_limit() -> u32 {
    DEFAULT_QUERY_LIMIT_EXP
}

impl Cipher {
    pub fn new(
        name: impl Into<String>,
        block_size_exp: u32,
        key_size_exp: u32,
        pre_key_size_exp: u32,
        cipher_type: CipherType,
    ) -> Self {
        Self {
            name: name.into(),
            block_size_exp,
            key_size_exp,
            pre_key_size_exp,
            cipher_type,
            query_limit_exp: DEFAULT_QUERY_LIMIT_EXP,
            parameter: None,
        }
    }

    pub fn with_query_limit(mut self, query_limit_exp: u32) -> Self {
        self.query_limit_exp = query_limit_exp;
        self
    }

    pub fn with_parameter(mut self, parameter: u32) -> Self {
        self.parameter = Some(parameter);
        self
    }

    /// Primary key into this cipher's calibration tables.
    pub fn parameter_exp(&self) -> u32 {
        self.parameter.unwrap_or(self.block_size_exp)
    }

    /// `name-parameter`, e.g. `Chaskey-8`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.name, self.parameter_exp())
    }
}

/// Ciphers the report covers when no config names others.
pub fn default_catalog() -> Vec<Cipher> {
    vec![
        Cipher::new("Chaskey", 128, 0, 128, CipherType::EvenMansour)
            .with_query_limit(48)
            .with_parameter(8),
        Cipher::new("Chaskey", 128, 0, 128, CipherType::EvenMansour)
            .with_query_limit(48)
            .with_parameter(12),
        Cipher::new("Prince", 64, 64, 64, CipherType::Fx).with_query_limit(48),
        Cipher::new("Elephant", 160, 0, 128, CipherType::EvenMansour).with_query_limit(47),
        Cipher::new("Elephant", 176, 0, 128, CipherType::EvenMansour).with_query_limit(47),
        Cipher::new("Elephant", 200, 0, 128, CipherType::EvenMansour).with_query_limit(69),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_defaults_to_block_size() {
        let prince = Cipher::new("Prince", 64, 64, 64, CipherType::Fx);
        assert_eq!(prince.parameter_exp(), 64);
        assert_eq!(prince.query_limit_exp, DEFAULT_QUERY_LIMIT_EXP);
        assert_eq!(prince.with_parameter(12).label(), "Prince-12");
    }

    #[test]
    fn test_default_catalog() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 6);
        let labels: Vec<String> = catalog.iter().map(Cipher::label).collect();
        assert_eq!(
            labels,
            [
                "Chaskey-8",
                "Chaskey-12",
                "Prince-64",
                "Elephant-160",
                "Elephant-176",
                "Elephant-200"
            ]
        );
        assert!(catalog
            .iter()
            .filter(|c| c.cipher_type == CipherType::EvenMansour)
            .all(|c| c.key_size_exp == 0));
    }

    #[test]
    fn test_cipher_json() {
        let json = r#"{"name":"Toy","block_size_exp":32,"key_size_exp":16,"pre_key_size_exp":32,"type":"fx"}"#;
        let cipher: Cipher = serde_json::from_str(json).unwrap();
        assert_eq!(cipher, Cipher::new("Toy", 32, 16, 32, CipherType::Fx));

        let odd = json.replace("\"fx\"", "\"feistel\"");
        let cipher: Cipher = serde_json::from_str(&odd).unwrap();
        assert_eq!(cipher.cipher_type, CipherType::Unknown);
    }
}
