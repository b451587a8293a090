//! Error types for Signet Core.

use thiserror::Error;

/// Errors produced by the address codec and the call encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid identity: expected 32 bytes, got {len}")]
    InvalidIdentity { len: usize },

    #[error("invalid address text: {0}")]
    InvalidAddressText(String),

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    #[error("sequence number out of range: {0}")]
    SequenceOutOfRange(String),

    #[error("unsupported address prefix: {0}")]
    UnsupportedPrefix(u8),

    #[error("invalid address scheme: {0}")]
    InvalidScheme(String),

    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("non-canonical sequence encoding")]
    NonCanonicalEncoding,

    #[error("invalid signature")]
    InvalidSignature,
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
