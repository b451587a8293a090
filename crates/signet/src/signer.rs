//! The signing capability consumed by the pipeline.

use signet_core::PublicKey;

/// Something that can sign raw bytes on behalf of an identity.
///
/// This is the seam to the key store. Looking up the key-pair for
/// `identity`, unlocking it and talking to hardware are the implementor's
/// business; the pipeline only hands over the identity and the exact bytes
/// to sign and reports whatever comes back.
///
/// No `Sync` bound is required. Implementations that hold a lock or a device
/// handle may need callers to serialize concurrent signing for one identity.
pub trait Signer {
    /// Sign `message` with the key-pair identified by `identity`.
    fn sign(&self, identity: &PublicKey, message: &[u8]) -> anyhow::Result<Vec<u8>>;
}

impl<F> Signer for F
where
    F: Fn(&PublicKey, &[u8]) -> anyhow::Result<Vec<u8>>,
{
    fn sign(&self, identity: &PublicKey, message: &[u8]) -> anyhow::Result<Vec<u8>> {
        self(identity, message)
    }
}
