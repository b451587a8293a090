//! Canonical call encoding.
//!
//! The bytes that get signed for a pending call are:
//!
//! > target (32 bytes) || sequence || payload
//!
//! Field order is fixed. The sequence width depends on the [`MessageFormat`]:
//! `V1Fixed` writes it as an 8-byte little-endian integer, `V2Compact` as a
//! SCALE compact integer. The payload is opaque and its length is implied by
//! the end of the buffer.
//!
//! **CRITICAL**: a format is FROZEN once released. Reordering or re-widening a
//! field is a new format, never an edit to an existing one.

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CodecError, Result};
use crate::types::{PublicKey, SequenceNumber, PUBLIC_KEY_LEN};

/// Width of the sequence field in [`MessageFormat::V1Fixed`].
pub const FIXED_SEQUENCE_LEN: usize = 8;

/// Versioned layout of a canonical message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFormat {
    /// Sequence as u64 little-endian.
    #[default]
    V1Fixed,
    /// Sequence as SCALE compact integer.
    V2Compact,
}

impl MessageFormat {
    /// Encode a call, validating the target and sequence first.
    ///
    /// The target must be exactly 32 bytes and the sequence must fit in a
    /// u64. Nothing is encoded if either check fails.
    pub fn encode<S>(self, target: &[u8], sequence: S, payload: &[u8]) -> Result<CanonicalMessage>
    where
        S: TryInto<u64> + fmt::Display + Copy,
    {
        let target = PublicKey::try_from(target)?;
        let sequence = SequenceNumber::new(sequence)?;
        Ok(self.encode_parts(&target, sequence, payload))
    }

    /// Encode already-validated parts.
    pub fn encode_parts(
        self,
        target: &PublicKey,
        sequence: SequenceNumber,
        payload: &[u8],
    ) -> CanonicalMessage {
        let mut buf = BytesMut::with_capacity(
            PUBLIC_KEY_LEN + self.sequence_width(sequence) + payload.len(),
        );

        buf.put_slice(target.as_bytes());
        match self {
            MessageFormat::V1Fixed => buf.put_u64_le(sequence.get()),
            MessageFormat::V2Compact => encode_compact(&mut buf, sequence.get()),
        }
        let sequence_end = buf.len();
        buf.put_slice(payload);

        CanonicalMessage {
            bytes: buf.freeze(),
            sequence_end,
        }
    }

    /// Number of bytes the sequence field occupies for `sequence`.
    pub fn sequence_width(self, sequence: SequenceNumber) -> usize {
        match self {
            MessageFormat::V1Fixed => FIXED_SEQUENCE_LEN,
            MessageFormat::V2Compact => compact_len(sequence.get()),
        }
    }

    /// Split a canonical message back into its fields.
    pub fn decode(self, bytes: &[u8]) -> Result<DecodedCall> {
        let message = CanonicalMessage::parse(Bytes::copy_from_slice(bytes), self)?;
        Ok(DecodedCall {
            target: message.target(),
            sequence: self.read_sequence(message.sequence_region())?,
            payload: message.bytes.slice(message.sequence_end..),
        })
    }

    /// Length of the sequence field at the start of `rest`.
    fn sequence_field_len(self, rest: &[u8]) -> Result<usize> {
        let len = match self {
            MessageFormat::V1Fixed => FIXED_SEQUENCE_LEN,
            MessageFormat::V2Compact => {
                let first = *rest
                    .first()
                    .ok_or_else(|| CodecError::MalformedMessage("missing sequence".into()))?;
                match first & 0b11 {
                    0b00 => 1,
                    0b01 => 2,
                    0b10 => 4,
                    _ => 1 + (first >> 2) as usize + 4,
                }
            }
        };
        if rest.len() < len {
            return Err(CodecError::MalformedMessage(format!(
                "sequence needs {} bytes, {} available",
                len,
                rest.len()
            )));
        }
        Ok(len)
    }

    fn read_sequence(self, field: &[u8]) -> Result<SequenceNumber> {
        match self {
            MessageFormat::V1Fixed => {
                let mut arr = [0u8; FIXED_SEQUENCE_LEN];
                arr.copy_from_slice(field);
                Ok(SequenceNumber(u64::from_le_bytes(arr)))
            }
            MessageFormat::V2Compact => decode_compact(field).map(SequenceNumber),
        }
    }
}

/// Encode a call with the default format.
pub fn encode_call<S>(target: &[u8], sequence: S, payload: &[u8]) -> Result<CanonicalMessage>
where
    S: TryInto<u64> + fmt::Display + Copy,
{
    MessageFormat::default().encode(target, sequence, payload)
}

/// The exact bytes that get signed for a call.
#[derive(Clone, PartialEq, Eq)]
pub struct CanonicalMessage {
    bytes: Bytes,
    sequence_end: usize,
}

impl CanonicalMessage {
    /// Wrap bytes received from elsewhere, checking their layout.
    pub fn parse(bytes: Bytes, format: MessageFormat) -> Result<Self> {
        if bytes.len() < PUBLIC_KEY_LEN {
            return Err(CodecError::MalformedMessage(format!(
                "message of {} bytes is shorter than the target identity",
                bytes.len()
            )));
        }
        let sequence_len = format.sequence_field_len(&bytes[PUBLIC_KEY_LEN..])?;
        let message = Self {
            sequence_end: PUBLIC_KEY_LEN + sequence_len,
            bytes,
        };
        format.read_sequence(message.sequence_region())?;
        Ok(message)
    }

    /// Recover `(target, sequence, payload)` from message bytes.
    pub fn decode(bytes: &[u8], format: MessageFormat) -> Result<DecodedCall> {
        format.decode(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The identity the call is made for.
    pub fn target(&self) -> PublicKey {
        let mut arr = [0u8; PUBLIC_KEY_LEN];
        arr.copy_from_slice(&self.bytes[..PUBLIC_KEY_LEN]);
        PublicKey(arr)
    }

    /// The serialized sequence number.
    pub fn sequence_region(&self) -> &[u8] {
        &self.bytes[PUBLIC_KEY_LEN..self.sequence_end]
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[self.sequence_end..]
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Debug for CanonicalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CanonicalMessage({:?}, seq=0x{}, payload={} bytes)",
            self.target(),
            hex::encode(self.sequence_region()),
            self.payload().len()
        )
    }
}

impl AsRef<[u8]> for CanonicalMessage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Fields recovered from a canonical message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    pub target: PublicKey,
    pub sequence: SequenceNumber,
    pub payload: Bytes,
}

fn compact_len(n: u64) -> usize {
    if n < 1 << 6 {
        1
    } else if n < 1 << 14 {
        2
    } else if n < 1 << 30 {
        4
    } else {
        1 + significant_bytes(n)
    }
}

/// Number of bytes needed for `n` in little-endian, never less than 4.
fn significant_bytes(n: u64) -> usize {
    let bits = 64 - n.leading_zeros() as usize;
    ((bits + 7) / 8).max(4)
}

fn encode_compact(buf: &mut BytesMut, n: u64) {
    if n < 1 << 6 {
        buf.put_u8((n as u8) << 2);
    } else if n < 1 << 14 {
        buf.put_u16_le(((n as u16) << 2) | 0b01);
    } else if n < 1 << 30 {
        buf.put_u32_le(((n as u32) << 2) | 0b10);
    } else {
        let len = significant_bytes(n);
        buf.put_u8((((len - 4) as u8) << 2) | 0b11);
        buf.put_slice(&n.to_le_bytes()[..len]);
    }
}

/// Decode a compact integer occupying exactly `field`, rejecting any
/// encoding that is not the shortest one.
fn decode_compact(field: &[u8]) -> Result<u64> {
    let mut arr = [0u8; 8];
    let (value, min) = match field.len() {
        1 => (u64::from(field[0] >> 2), 0),
        2 => {
            arr[..2].copy_from_slice(field);
            (u64::from_le_bytes(arr) >> 2, 1 << 6)
        }
        4 => {
            arr[..4].copy_from_slice(field);
            (u64::from_le_bytes(arr) >> 2, 1 << 14)
        }
        len if len > 8 + 1 => {
            return Err(CodecError::MalformedMessage(format!(
                "compact sequence of {} bytes does not fit in a u64",
                len - 1
            )))
        }
        len => {
            let body = &field[1..];
            if body[body.len() - 1] == 0 {
                return Err(CodecError::NonCanonicalEncoding);
            }
            arr[..len - 1].copy_from_slice(body);
            (u64::from_le_bytes(arr), 1 << 30)
        }
    };

    if value < min {
        return Err(CodecError::NonCanonicalEncoding);
    }
    Ok(value)
}
