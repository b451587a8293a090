//! Error types for the signing pipeline.

use signet_core::CodecError;
use thiserror::Error;

/// Errors that can occur while producing a signed envelope.
#[derive(Debug, Error)]
pub enum SignError {
    /// The call could not be encoded. The signer was not invoked.
    #[error("encoding error: {0}")]
    Codec(#[from] CodecError),

    /// The external signer failed. The original error is kept as the source
    /// and can be recovered with [`anyhow::Error::downcast_ref`].
    #[error("signer failure: {0}")]
    SignerFailure(#[source] anyhow::Error),

    /// The signer returned a signature of unexpected width.
    #[error("signature length mismatch: expected {expected}, got {got}")]
    SignatureLength { expected: usize, got: usize },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, SignError>;
