//! Signed envelopes.
//!
//! An envelope is the transmissible form of a signed call:
//!
//! > data = message || signature
//!
//! There is no separator and no length prefix. A verifier can only split
//! `data` if it knows the signature length of the scheme in use.

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::canonical::{CanonicalMessage, DecodedCall, MessageFormat};
use crate::crypto::verify_ed25519;
use crate::error::{CodecError, Result};

/// A canonical message, its signature, and their concatenation.
///
/// `message` and `signature` are views into `data`, so the three can never
/// disagree.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    message: CanonicalMessage,
    signature: Bytes,
    data: Bytes,
}

impl SignedEnvelope {
    /// Concatenate a message and the signature produced over it.
    pub fn new(message: CanonicalMessage, signature: &[u8]) -> Self {
        let mut buf = BytesMut::with_capacity(message.len() + signature.len());
        buf.put_slice(message.as_bytes());
        buf.put_slice(signature);
        let data = buf.freeze();

        Self {
            signature: data.slice(message.len()..),
            message,
            data,
        }
    }

    /// Split transmitted bytes back into message and signature.
    pub fn split(data: Bytes, format: MessageFormat, signature_len: usize) -> Result<Self> {
        if data.len() < signature_len {
            return Err(CodecError::MalformedMessage(format!(
                "envelope of {} bytes cannot hold a {}-byte signature",
                data.len(),
                signature_len
            )));
        }
        let message_len = data.len() - signature_len;
        let message = CanonicalMessage::parse(data.slice(..message_len), format)?;

        Ok(Self {
            message,
            signature: data.slice(message_len..),
            data,
        })
    }

    pub fn message(&self) -> &CanonicalMessage {
        &self.message
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The transmissible bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Convert the transmissible bytes to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }

    /// Check an Ed25519 signature against the message's own target identity
    /// and return the decoded call.
    pub fn verify_ed25519(&self, format: MessageFormat) -> Result<DecodedCall> {
        verify_ed25519(&self.message.target(), self.message.as_bytes(), &self.signature)?;
        format.decode(self.message.as_bytes())
    }
}

impl fmt::Debug for SignedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignedEnvelope({:?}, signature={} bytes)",
            self.message,
            self.signature.len()
        )
    }
}

impl AsRef<[u8]> for SignedEnvelope {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::encode_call;
    use crate::crypto::{Keypair, ED25519_SIGNATURE_LEN};

    fn signed(seq: u64, payload: &[u8]) -> (Keypair, SignedEnvelope) {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let message = encode_call(keypair.public_key().as_bytes(), seq, payload).unwrap();
        let signature = keypair.sign(message.as_bytes());
        (keypair, SignedEnvelope::new(message, signature.as_ref()))
    }

    #[test]
    fn test_data_is_message_then_signature() {
        let (_, envelope) = signed(7, b"call");
        let mut expected = envelope.message().as_bytes().to_vec();
        expected.extend_from_slice(envelope.signature());
        assert_eq!(envelope.data(), &expected[..]);
        assert_eq!(envelope.signature().len(), ED25519_SIGNATURE_LEN);
    }

    #[test]
    fn test_known_signature() {
        let (_, envelope) = signed(7, &[]);
        assert_eq!(
            hex::encode(envelope.signature()),
            "7b7117762fed93c4b0d4a1415033db271b92ba772819fb518ee87675f42f2deb\
             bd042dadbe936f9a957800bec55623409d92f782cdb6bb6a5750ee3bd7e40f08"
        );
    }

    #[test]
    fn test_split_recovers_parts() {
        let (_, envelope) = signed(9, b"payload bytes");
        let split = SignedEnvelope::split(
            Bytes::copy_from_slice(envelope.data()),
            MessageFormat::V1Fixed,
            ED25519_SIGNATURE_LEN,
        )
        .unwrap();
        assert_eq!(split, envelope);
    }

    #[test]
    fn test_split_rejects_short_data() {
        let result = SignedEnvelope::split(
            Bytes::from_static(&[0u8; 40]),
            MessageFormat::V1Fixed,
            ED25519_SIGNATURE_LEN,
        );
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));
    }

    #[test]
    fn test_verify() {
        let (keypair, envelope) = signed(3, b"transfer");
        let call = envelope.verify_ed25519(MessageFormat::V1Fixed).unwrap();
        assert_eq!(call.target, keypair.public_key());
        assert_eq!(call.sequence.get(), 3);
        assert_eq!(&call.payload[..], b"transfer");
    }

    #[test]
    fn test_verify_rejects_tampered_data() {
        let (_, envelope) = signed(3, b"transfer");
        let mut data = envelope.data().to_vec();
        // Flip a payload bit.
        data[41] ^= 0x01;
        let tampered =
            SignedEnvelope::split(Bytes::from(data), MessageFormat::V1Fixed, ED25519_SIGNATURE_LEN)
                .unwrap();
        assert_eq!(
            tampered.verify_ed25519(MessageFormat::V1Fixed),
            Err(CodecError::InvalidSignature)
        );
    }
}
