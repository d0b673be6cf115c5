/*!
 * Error Handling for the GCM Module
 *
 * Provides structured error types with numeric error codes, user-friendly
 * messages and suggested remediation. Authentication failure is reported as
 * its own variant so callers never confuse it with a malformed request.
 */

use std::collections::HashMap;
use thiserror::Error;

/// Error type for all GCM and supporting operations
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Authentication failed: {operation} - {cause}")]
    AuthenticationError {
        operation: String,
        cause: String,
        error_code: u32,
    },

    #[error("Invalid parameter: {parameter} - {expected} - got {actual}")]
    InvalidParameter {
        parameter: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Random number generation failed: {cause}")]
    RandomGenerationError { cause: String, error_code: u32 },

    #[error("Side-channel protection failure: {test_name} - {details}")]
    SideChannelViolation {
        test_name: String,
        details: String,
        error_code: u32,
    },

    #[error("Self test failed: {test_name} - {details}")]
    SelfTestFailed {
        test_name: String,
        details: String,
        error_code: u32,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Error code constants for different error categories
pub mod error_codes {
    // GCM errors: 3000-3999
    pub const GCM_INVALID_KEY_SIZE: u32 = 3003;
    pub const GCM_INVALID_NONCE_SIZE: u32 = 3004;
    pub const GCM_AUTHENTICATION_FAILED: u32 = 3005;
    pub const GCM_INVALID_TAG_SIZE: u32 = 3006;
    pub const GCM_BUFFER_SIZE_MISMATCH: u32 = 3007;
    pub const GCM_MESSAGE_TOO_LONG: u32 = 3008;
    pub const GCM_SELF_TEST_FAILED: u32 = 3009;

    // Security errors: 5000-5999
    pub const INSUFFICIENT_ENTROPY: u32 = 5002;
    pub const SIDE_CHANNEL_LEAK: u32 = 5004;

    // Generic errors: 9000+
    pub const SERIALIZATION_FAILED: u32 = 9001;
    pub const INVALID_PARAMETER: u32 = 9999;
}

impl CryptoError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            CryptoError::AuthenticationError { error_code, .. } => *error_code,
            CryptoError::InvalidParameter { error_code, .. } => *error_code,
            CryptoError::RandomGenerationError { error_code, .. } => *error_code,
            CryptoError::SideChannelViolation { error_code, .. } => *error_code,
            CryptoError::SelfTestFailed { error_code, .. } => *error_code,
            CryptoError::SerializationError(_) => error_codes::SERIALIZATION_FAILED,
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            CryptoError::AuthenticationError { .. } => {
                "Message authentication failed. The data was modified or the wrong key, nonce or associated data was used."
                    .to_string()
            }
            CryptoError::InvalidParameter {
                parameter,
                expected,
                ..
            } => {
                format!(
                    "Invalid parameter '{}'. Expected '{}'.",
                    parameter, expected
                )
            }
            CryptoError::RandomGenerationError { .. } => {
                "Random number generation failed. Nonces cannot be generated safely.".to_string()
            }
            CryptoError::SideChannelViolation { test_name, .. } => {
                format!(
                    "Side-channel vulnerability detected in '{}'. Security may be compromised.",
                    test_name
                )
            }
            CryptoError::SelfTestFailed { test_name, .. } => {
                format!(
                    "Known-answer self test '{}' failed. The cipher implementation must not be used.",
                    test_name
                )
            }
            CryptoError::SerializationError(_) => {
                "Data serialization failed. Configuration format may be corrupted.".to_string()
            }
        }
    }

    /// Get technical details for debugging
    pub fn technical_details(&self) -> HashMap<String, String> {
        let mut details = HashMap::new();

        details.insert("error_code".to_string(), self.error_code().to_string());
        details.insert("error_type".to_string(), self.error_type().to_string());
        details.insert("timestamp".to_string(), chrono::Utc::now().to_rfc3339());

        match self {
            CryptoError::AuthenticationError {
                operation, cause, ..
            } => {
                details.insert("operation".to_string(), operation.clone());
                details.insert("cause".to_string(), cause.clone());
            }
            CryptoError::InvalidParameter {
                parameter,
                expected,
                actual,
                ..
            } => {
                details.insert("parameter".to_string(), parameter.clone());
                details.insert("expected".to_string(), expected.clone());
                details.insert("actual".to_string(), actual.clone());
            }
            _ => {
                details.insert("details".to_string(), format!("{:?}", self));
            }
        }

        details
    }

    /// Get suggested remediation steps
    pub fn suggested_remediation(&self) -> Option<String> {
        match self {
            CryptoError::InvalidParameter { error_code, .. } => match *error_code {
                error_codes::GCM_INVALID_KEY_SIZE => {
                    Some("Use a 16, 24 or 32 byte AES key.".to_string())
                }
                error_codes::GCM_INVALID_TAG_SIZE => Some(
                    "Use a tag length of 4, 8, 12, 13, 14, 15 or 16 bytes.".to_string(),
                ),
                error_codes::GCM_INVALID_NONCE_SIZE => Some(
                    "Use a non-empty nonce; 12 bytes is recommended.".to_string(),
                ),
                error_codes::GCM_BUFFER_SIZE_MISMATCH => Some(
                    "Output buffers must be exactly as long as the input.".to_string(),
                ),
                error_codes::GCM_MESSAGE_TOO_LONG => Some(
                    "Split the message; GCM encrypts at most 2^36 - 32 bytes per nonce."
                        .to_string(),
                ),
                _ => None,
            },
            CryptoError::AuthenticationError { .. } => Some(
                "Discard the message. Check the key, nonce and associated data used by the sender."
                    .to_string(),
            ),
            CryptoError::RandomGenerationError { .. } => Some(
                "Check system entropy sources or supply nonces from a counter.".to_string(),
            ),
            CryptoError::SelfTestFailed { .. } => Some(
                "Stop using the library and rebuild it; the block cipher or field arithmetic is broken."
                    .to_string(),
            ),
            _ => None,
        }
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            CryptoError::AuthenticationError { .. } => "AuthenticationError",
            CryptoError::InvalidParameter { .. } => "InvalidParameter",
            CryptoError::RandomGenerationError { .. } => "RandomGenerationError",
            CryptoError::SideChannelViolation { .. } => "SideChannelViolation",
            CryptoError::SelfTestFailed { .. } => "SelfTestFailed",
            CryptoError::SerializationError(_) => "SerializationError",
        }
    }

    /// Whether this error is an authentication failure rather than a usage error
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, CryptoError::AuthenticationError { .. })
    }
}

/// Convenience constructors for common error types
impl CryptoError {
    pub fn authentication_error(operation: &str, cause: &str, error_code: u32) -> Self {
        CryptoError::AuthenticationError {
            operation: operation.to_string(),
            cause: cause.to_string(),
            error_code,
        }
    }

    pub fn invalid_parameter(parameter: &str, expected: &str, actual: &str) -> Self {
        Self::invalid_parameter_with_code(
            parameter,
            expected,
            actual,
            error_codes::INVALID_PARAMETER,
        )
    }

    pub fn invalid_parameter_with_code(
        parameter: &str,
        expected: &str,
        actual: &str,
        error_code: u32,
    ) -> Self {
        CryptoError::InvalidParameter {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code,
        }
    }

    pub fn self_test_failed(test_name: &str, details: &str) -> Self {
        CryptoError::SelfTestFailed {
            test_name: test_name.to_string(),
            details: details.to_string(),
            error_code: error_codes::GCM_SELF_TEST_FAILED,
        }
    }
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        CryptoError::SerializationError(err.to_string())
    }
}

/// Result type alias for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;
