//! Strong type definitions for Signet.
//!
//! Identities and sequence numbers are newtypes so that an unchecked byte
//! slice or a signed integer can never reach the encoders directly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CodecError, Result};

/// Length in bytes of every identity handled by this crate.
pub const PUBLIC_KEY_LEN: usize = 32;

/// A 32-byte public key identifying a signing key-pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string. An optional `0x` prefix is accepted.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| CodecError::InvalidAddressText(e.to_string()))?;
        Self::try_from(bytes.as_slice())
    }

    /// The all-zero key.
    pub const ZERO: Self = Self([0u8; PUBLIC_KEY_LEN]);
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = CodecError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        let arr: [u8; PUBLIC_KEY_LEN] = slice
            .try_into()
            .map_err(|_| CodecError::InvalidIdentity { len: slice.len() })?;
        Ok(Self(arr))
    }
}

/// A per-identity call counter (nonce) supplied by the caller.
///
/// The core never increments or tracks it; it only serializes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SequenceNumber(pub u64);

impl SequenceNumber {
    /// Convert any integer into a sequence number, rejecting values that
    /// are negative or wider than 64 bits.
    pub fn new<S>(value: S) -> Result<Self>
    where
        S: TryInto<u64> + fmt::Display + Copy,
    {
        value
            .try_into()
            .map(Self)
            .map_err(|_| CodecError::SequenceOutOfRange(value.to_string()))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SequenceNumber {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
