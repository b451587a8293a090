//! # Signet
//!
//! SS58 addresses and a signing pipeline for canonical call envelopes.
//!
//! ## Overview
//!
//! Signet turns a call into bytes that can be signed and sent:
//!
//! - **Addresses**: Public keys rendered as checksummed SS58 text and parsed back
//! - **Canonical messages**: `target || sequence || payload`, byte-exact and deterministic
//! - **Envelopes**: The message followed by the signature an external [`Signer`] produced
//!
//! Key storage is not part of this crate. The pipeline asks a [`Signer`] for
//! a signature and reports whatever it returns.
//!
//! ## Usage
//!
//! ```rust
//! use signet::core::{Keypair, PublicKey};
//! use signet::{sign_call, verify_envelope, MessageFormat};
//!
//! let keypair = Keypair::from_seed(&[0x42; 32]);
//! let signer = |_: &PublicKey, message: &[u8]| -> anyhow::Result<Vec<u8>> {
//!     Ok(keypair.sign(message).as_ref().to_vec())
//! };
//!
//! let target = keypair.public_key();
//! let envelope = sign_call(target.as_bytes(), 7u64, b"transfer", &signer).unwrap();
//!
//! let call = verify_envelope(envelope.data(), MessageFormat::V1Fixed, 64).unwrap();
//! assert_eq!(call.target, target);
//! ```
//!
//! ## Re-exports
//!
//! - `signet::core` - Addresses, messages and envelopes without any signing

pub mod display;
pub mod error;
pub mod pipeline;
pub mod signer;

pub use signet_core as core;

pub use display::{shorten, AddressSummary, KnownAccounts};
pub use error::{Result, SignError};
pub use pipeline::{sign_call, verify_envelope, PipelineConfig, SigningPipeline};
pub use signer::Signer;

pub use signet_core::{
    Address, AddressScheme, CanonicalMessage, CodecError, DecodedCall, MessageFormat, PublicKey,
    SequenceNumber, SignedEnvelope,
};
