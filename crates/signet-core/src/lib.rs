//! # Signet Core
//!
//! Pure primitives for Signet: addresses, canonical call messages, and
//! signed envelopes.
//!
//! This crate contains no I/O, no key storage, no networking. Every function
//! is deterministic and safe to call from any number of threads.
//!
//! ## Key Types
//!
//! - [`PublicKey`] - 32-byte identity of a signing key-pair
//! - [`Address`] - SS58 text form of a public key
//! - [`AddressScheme`] - Network prefix, checksum and alphabet of an address format
//! - [`CanonicalMessage`] - The exact bytes signed for a call
//! - [`SignedEnvelope`] - Message followed by its signature
//!
//! ## Addresses
//!
//! ```rust
//! use signet_core::{address, PublicKey};
//!
//! let address = address::encode(&PublicKey::ZERO);
//! assert_eq!(address::decode(address.as_str()).unwrap(), PublicKey::ZERO);
//! ```

pub mod address;
pub mod canonical;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod types;

pub use address::{
    Address, AddressAlphabet, AddressScheme, ChecksumHash, SchemeVersion, DEFAULT_PREFIX,
    MAX_SINGLE_BYTE_PREFIX, PLACEHOLDER_ADDRESS, PLACEHOLDER_SHORT,
};
pub use canonical::{encode_call, CanonicalMessage, DecodedCall, MessageFormat};
pub use crypto::{verify_ed25519, Ed25519Signature, Keypair, ED25519_SIGNATURE_LEN};
pub use envelope::SignedEnvelope;
pub use error::{CodecError, Result};
pub use types::{PublicKey, SequenceNumber, PUBLIC_KEY_LEN};
