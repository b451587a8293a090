//! The signing pipeline: canonical message in, signed envelope out.
//!
//! The pipeline is a thin, synchronous orchestration:
//!
//! 1. Encode `(target, sequence, payload)` into a [`CanonicalMessage`].
//!    Validation failures abort here, before any signing attempt.
//! 2. Ask the [`Signer`] to sign exactly those bytes for `target`.
//! 3. Concatenate message and signature into a [`SignedEnvelope`].
//!
//! Nothing is retried, cached or persisted, and sequence numbers are never
//! touched.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use signet_core::{
    CanonicalMessage, DecodedCall, MessageFormat, SignedEnvelope, ED25519_SIGNATURE_LEN,
};

use crate::error::{Result, SignError};
use crate::signer::Signer;

/// Configuration for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Layout of the canonical message.
    pub format: MessageFormat,
    /// Width every signature must have. `None` accepts any width.
    pub signature_len: Option<usize>,
    /// Emit message and signature bytes as hex at debug level.
    pub trace_bytes: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            format: MessageFormat::V1Fixed,
            signature_len: Some(ED25519_SIGNATURE_LEN),
            trace_bytes: false,
        }
    }
}

/// Builds signed envelopes for calls.
#[derive(Debug, Clone, Default)]
pub struct SigningPipeline {
    config: PipelineConfig,
}

impl SigningPipeline {
    /// Create a new pipeline.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Encode a call, have `signer` sign it, and return the envelope.
    pub fn sign<S, N>(
        &self,
        target: &[u8],
        sequence: N,
        payload: &[u8],
        signer: &S,
    ) -> Result<SignedEnvelope>
    where
        S: Signer + ?Sized,
        N: TryInto<u64> + fmt::Display + Copy,
    {
        let message = self.config.format.encode(target, sequence, payload)?;
        self.sign_message(message, signer)
    }

    /// Sign an already-encoded message.
    pub fn sign_message<S>(&self, message: CanonicalMessage, signer: &S) -> Result<SignedEnvelope>
    where
        S: Signer + ?Sized,
    {
        let identity = message.target();

        let signature = signer.sign(&identity, message.as_bytes()).map_err(|e| {
            warn!(identity = ?identity, "signer failed: {}", e);
            SignError::SignerFailure(e)
        })?;

        if let Some(expected) = self.config.signature_len {
            if signature.len() != expected {
                return Err(SignError::SignatureLength {
                    expected,
                    got: signature.len(),
                });
            }
        }

        if self.config.trace_bytes {
            debug!(message = %message.to_hex(), "  message");
            debug!(signature = %hex::encode(&signature), "signature");
        }

        Ok(SignedEnvelope::new(message, &signature))
    }

    /// Split and verify an Ed25519-signed envelope produced with this
    /// pipeline's format.
    pub fn verify(&self, data: &[u8]) -> Result<DecodedCall> {
        let signature_len = self.config.signature_len.unwrap_or(ED25519_SIGNATURE_LEN);
        verify_envelope(data, self.config.format, signature_len)
    }
}

/// Sign a call with the default configuration.
pub fn sign_call<S, N>(
    target: &[u8],
    sequence: N,
    payload: &[u8],
    signer: &S,
) -> Result<SignedEnvelope>
where
    S: Signer + ?Sized,
    N: TryInto<u64> + fmt::Display + Copy,
{
    SigningPipeline::default().sign(target, sequence, payload, signer)
}

/// Split `data` into message and signature, check the Ed25519 signature
/// against the message's target identity, and return the decoded call.
pub fn verify_envelope(
    data: &[u8],
    format: MessageFormat,
    signature_len: usize,
) -> Result<DecodedCall> {
    let envelope = SignedEnvelope::split(Bytes::copy_from_slice(data), format, signature_len)?;
    Ok(envelope.verify_ed25519(format)?)
}
