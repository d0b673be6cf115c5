//! GCM configuration and tag lengths

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{error_codes, CryptoError, CryptoResult};

/// Recommended nonce length in bytes (96 bits, the direct J0 path)
pub const GCM_NONCE_SIZE: usize = 12;

/// Full authentication tag length in bytes
pub const GCM_TAG_SIZE: usize = 16;

/// Authentication tag lengths permitted by SP 800-38D
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum TagLength {
    Tag32,
    Tag64,
    Tag96,
    Tag104,
    Tag112,
    Tag120,
    Tag128,
}

impl TagLength {
    /// All permitted tag lengths, shortest first
    pub const ALL: [TagLength; 7] = [
        TagLength::Tag32,
        TagLength::Tag64,
        TagLength::Tag96,
        TagLength::Tag104,
        TagLength::Tag112,
        TagLength::Tag120,
        TagLength::Tag128,
    ];

    /// Map a tag length in bytes to its variant
    pub fn from_bytes(len: usize) -> CryptoResult<Self> {
        match len {
            4 => Ok(TagLength::Tag32),
            8 => Ok(TagLength::Tag64),
            12 => Ok(TagLength::Tag96),
            13 => Ok(TagLength::Tag104),
            14 => Ok(TagLength::Tag112),
            15 => Ok(TagLength::Tag120),
            16 => Ok(TagLength::Tag128),
            other => Err(CryptoError::invalid_parameter_with_code(
                "tag",
                "4, 8, 12, 13, 14, 15 or 16 bytes",
                &format!("{} bytes", other),
                error_codes::GCM_INVALID_TAG_SIZE,
            )),
        }
    }

    /// Tag length in bytes
    pub fn bytes(self) -> usize {
        match self {
            TagLength::Tag32 => 4,
            TagLength::Tag64 => 8,
            TagLength::Tag96 => 12,
            TagLength::Tag104 => 13,
            TagLength::Tag112 => 14,
            TagLength::Tag120 => 15,
            TagLength::Tag128 => 16,
        }
    }
}

impl Default for TagLength {
    fn default() -> Self {
        TagLength::Tag128
    }
}

impl TryFrom<usize> for TagLength {
    type Error = CryptoError;

    fn try_from(len: usize) -> CryptoResult<Self> {
        TagLength::from_bytes(len)
    }
}

impl From<TagLength> for usize {
    fn from(tag_length: TagLength) -> usize {
        tag_length.bytes()
    }
}

impl fmt::Display for TagLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bytes() * 8)
    }
}

/// Defaults applied by the keyed `AesGcm` convenience methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcmConfig {
    /// Tag length appended by `encrypt` and expected by `decrypt`
    pub tag_length: TagLength,
    /// Nonce length produced by `generate_nonce`
    pub nonce_length: usize,
}

impl Default for GcmConfig {
    fn default() -> Self {
        Self {
            tag_length: TagLength::Tag128,
            nonce_length: GCM_NONCE_SIZE,
        }
    }
}

impl GcmConfig {
    /// Check the configuration describes usable parameters
    pub fn validate(&self) -> CryptoResult<()> {
        if self.nonce_length == 0 {
            return Err(CryptoError::invalid_parameter_with_code(
                "nonce_length",
                "at least 1 byte",
                "0 bytes",
                error_codes::GCM_INVALID_NONCE_SIZE,
            ));
        }
        Ok(())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> CryptoResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> CryptoResult<Self> {
        let config: GcmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_length_mapping() {
        for tag_length in TagLength::ALL {
            assert_eq!(TagLength::from_bytes(tag_length.bytes()).unwrap(), tag_length);
        }

        for bad in [0, 1, 3, 5, 7, 9, 10, 11, 17, 32] {
            let err = TagLength::from_bytes(bad).unwrap_err();
            assert_eq!(err.error_code(), error_codes::GCM_INVALID_TAG_SIZE);
        }
    }

    #[test]
    fn test_default_config() {
        let config = GcmConfig::default();
        assert_eq!(config.tag_length, TagLength::Tag128);
        assert_eq!(config.nonce_length, GCM_NONCE_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = GcmConfig {
            tag_length: TagLength::Tag96,
            nonce_length: 16,
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"tag_length\":12"));
        assert_eq!(GcmConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_config_json_rejects_invalid_values() {
        assert!(GcmConfig::from_json(r#"{"tag_length":5,"nonce_length":12}"#).is_err());
        assert!(GcmConfig::from_json(r#"{"tag_length":16,"nonce_length":0}"#).is_err());

        let err = GcmConfig::from_json("not json").unwrap_err();
        assert_eq!(err.error_type(), "SerializationError");
    }
}
