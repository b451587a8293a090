//! Test fixtures and helpers.
//!
//! Signet never stores keys. These stand in for the external key store in
//! tests and benchmarks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use signet::{PipelineConfig, Signer, SigningPipeline};
use signet_core::{Address, AddressScheme, Keypair, PublicKey, SignedEnvelope};

/// Why the in-memory keyring refused to sign.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyringError {
    #[error("no key-pair for identity {0:?}")]
    UnknownIdentity(PublicKey),

    #[error("keyring is locked")]
    Locked,
}

/// An in-memory keyring that signs with Ed25519.
///
/// Counts every signing request it receives, including refused ones.
#[derive(Debug, Default)]
pub struct MemoryKeyring {
    pairs: HashMap<PublicKey, Keypair>,
    locked: bool,
    requests: AtomicUsize,
}

impl MemoryKeyring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key-pair derived from `seed` and return its identity.
    pub fn add_seed(&mut self, seed: [u8; 32]) -> PublicKey {
        self.add(Keypair::from_seed(&seed))
    }

    /// Add a random key-pair and return its identity.
    pub fn generate(&mut self) -> PublicKey {
        self.add(Keypair::generate())
    }

    pub fn add(&mut self, keypair: Keypair) -> PublicKey {
        let identity = keypair.public_key();
        self.pairs.insert(identity, keypair);
        identity
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn identities(&self) -> impl Iterator<Item = &PublicKey> {
        self.pairs.keys()
    }

    /// Signing requests seen so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }
}

impl Signer for MemoryKeyring {
    fn sign(&self, identity: &PublicKey, message: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        if self.locked {
            return Err(KeyringError::Locked.into());
        }
        let keypair = self
            .pairs
            .get(identity)
            .ok_or(KeyringError::UnknownIdentity(*identity))?;

        Ok(keypair.sign(message).as_ref().to_vec())
    }
}

/// A keyring holding one deterministic account, plus a pipeline.
pub struct TestFixture {
    pub keyring: MemoryKeyring,
    pub identity: PublicKey,
    pub pipeline: SigningPipeline,
}

impl TestFixture {
    /// Create a new test fixture with a random key-pair.
    pub fn new() -> Self {
        let mut keyring = MemoryKeyring::new();
        let identity = keyring.generate();
        Self::from_parts(keyring, identity, PipelineConfig::default())
    }

    /// Create with a deterministic key-pair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        let mut keyring = MemoryKeyring::new();
        let identity = keyring.add_seed(seed);
        Self::from_parts(keyring, identity, PipelineConfig::default())
    }

    /// Replace the pipeline configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.pipeline = SigningPipeline::new(config);
        self
    }

    fn from_parts(keyring: MemoryKeyring, identity: PublicKey, config: PipelineConfig) -> Self {
        Self {
            keyring,
            identity,
            pipeline: SigningPipeline::new(config),
        }
    }

    /// The account's address under the default scheme.
    pub fn address(&self) -> Address {
        AddressScheme::default().encode(&self.identity)
    }

    /// Sign a call from this fixture's account.
    pub fn sign(&self, sequence: u64, payload: &[u8]) -> signet::Result<SignedEnvelope> {
        self.pipeline
            .sign(self.identity.as_bytes(), sequence, payload, &self.keyring)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}
