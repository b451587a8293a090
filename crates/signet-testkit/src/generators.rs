//! Proptest generators for property-based testing.

use proptest::prelude::*;

use signet_core::{AddressScheme, Keypair, MessageFormat, PublicKey, MAX_SINGLE_BYTE_PREFIX};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate arbitrary 32 bytes as a public key. Not necessarily a curve point.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    any::<[u8; 32]>().prop_map(PublicKey::from_bytes)
}

/// Generate a single-byte network prefix.
pub fn prefix() -> impl Strategy<Value = u8> {
    0u8..=MAX_SINGLE_BYTE_PREFIX
}

/// Generate an SS58 scheme with the default alphabet and checksum width.
pub fn scheme() -> impl Strategy<Value = AddressScheme> {
    prefix().prop_filter_map("valid prefix", |p| AddressScheme::ss58(p).ok())
}

/// Generate a message format.
pub fn message_format() -> impl Strategy<Value = MessageFormat> {
    prop_oneof![Just(MessageFormat::V1Fixed), Just(MessageFormat::V2Compact)]
}

/// Generate a sequence number, biased towards compact-encoding boundaries.
pub fn sequence() -> impl Strategy<Value = u64> {
    prop_oneof![
        0u64..64,
        Just(63u64),
        Just(64u64),
        Just(16_383u64),
        Just(16_384u64),
        Just((1u64 << 30) - 1),
        Just(1u64 << 30),
        Just(u64::MAX),
        any::<u64>(),
    ]
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Parameters for a signed call.
#[derive(Debug, Clone)]
pub struct CallParams {
    pub keypair: Keypair,
    pub sequence: u64,
    pub payload: Vec<u8>,
    pub format: MessageFormat,
}

impl CallParams {
    pub fn target(&self) -> PublicKey {
        self.keypair.public_key()
    }
}

impl Arbitrary for CallParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<[u8; 32]>(), sequence(), payload(256), message_format())
            .prop_map(|(seed, sequence, payload, format)| CallParams {
                keypair: Keypair::from_seed(&seed),
                sequence,
                payload,
                format,
            })
            .boxed()
    }
}
